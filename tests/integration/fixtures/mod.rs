// Sample documents for each supported domain
// WHY: realistic inputs exercise several rules at once, including overlapping phrases

/// Anonymized cardiology discharge summary
pub const MEDICAL_DISCHARGE: &str = r#"DISCHARGE SUMMARY

Patient presents with acute myocardial infarction secondary to coronary artery occlusion.
Underwent emergent percutaneous coronary intervention with drug-eluting stent placement.
Post-procedural course complicated by transient hypotension requiring vasopressor support.

MEDICATIONS:
- Clopidogrel 75mg daily - contraindicated with omeprazole
- Metoprolol tartrate 25mg BID for cardioprotection
- Atorvastatin 80mg daily for secondary prevention

FOLLOW-UP:
Cardiology appointment in 2 weeks. Patient advised to monitor for signs of stent thrombosis
including chest pain, dyspnea, or diaphoresis. Return to ED immediately if symptoms occur."#;

/// Consumer contract with arbitration and cancellation terms
pub const LEASE_AGREEMENT: &str = r#"This Agreement (hereinafter the Lease) is made pursuant to state law.
Tenant shall indemnify and hold harmless the Landlord. Any dispute shall be resolved by
binding arbitration. Notwithstanding the foregoing, Tenant has the right to cancel within
3 business days. Please sign and return this Lease. Late fees apply after the fifth day."#;

/// Health policy summary
pub const INSURANCE_POLICY: &str = r#"Your deductible is $1,500 per year. Pre-existing conditions are subject to
exclusions during the first year. Prior authorization is required for imaging.
A grace period of 30 days applies to premium payments. You may file an appeal of any denial."#;

/// Clinic note pasted with ampersands, comparisons and stray markup
pub const SYMBOL_NOTE: &str = "Terms & Conditions apply. Tenant pays rent pursuant to the lease & schedule. \
Blood pressure <90 with dyspnea noted. Edema noted in <b>both</b> legs &amp; feet.";

/// Text with no recognizable jargon, long enough to pass the batch threshold
pub const PLAIN_NOTE: &str = "We went to the market on Saturday morning and bought apples, bread and a little cheese for the picnic.";
