//! Page copy shown around the chart. Opaque to the pipeline.

pub const PAGE_TITLE: &str = "Multidrug-Resistant Bacteria: When No Antibiotic Works";

pub const INTRO: &str = "\
### 🧪 Antibiotic Resistance is a Global Health Threat
This chart shows the **Minimum Inhibitory Concentration (MIC)** (the lowest concentration of an antibiotic that stops bacterial growth) for three common antibiotics.

Bacteria with ⚠️ are **multidrug-resistant (MDR)**: resistant to **all three antibiotics**. These bacteria may be untreatable with commonly-available medications.

A log scale is used here to visualize MIC values: higher values mean **stronger resistance**.";

pub const TAKEAWAYS: &str = "\
### Note:
- **Aerobacter aerogenes**, **Klebsiella pneumoniae**, and **Pseudomonas aeruginosa** show **high MICs** for all three antibiotics.
- These bacteria possess severe antimicrobial resistance and therefore need different treatments.";
