// Translate a sample discharge summary and print every section

use anyhow::Result;
use plainspeak::PlainEnglishTranslator;

const MEDICAL_TEXT: &str = "
DISCHARGE SUMMARY

Patient presents with acute myocardial infarction secondary to coronary artery occlusion.
Underwent emergent percutaneous coronary intervention with drug-eluting stent placement.
Post-procedural course complicated by transient hypotension requiring vasopressor support.

MEDICATIONS:
- Clopidogrel 75mg daily - contraindicated with omeprazole
- Metoprolol tartrate 25mg BID for cardioprotection
- Atorvastatin 80mg daily for secondary prevention
- Aspirin 81mg daily indefinitely

FOLLOW-UP:
Cardiology appointment in 2 weeks. Patient advised to monitor for signs of stent thrombosis
including chest pain, dyspnea, or diaphoresis. Return to ED immediately if symptoms occur.

PROGNOSIS:
With appropriate medical therapy and lifestyle modifications, long-term prognosis is favorable.
Patient counseled on smoking cessation and cardiac rehabilitation enrollment.
";

fn print_list(heading: &str, items: &[String]) {
    println!("\n{heading} ({} found):", items.len());
    for item in items {
        println!("   {item}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let translator = PlainEnglishTranslator::new()?;

    println!("Translating medical discharge summary...\n");
    let result = translator.translate_document(MEDICAL_TEXT);

    println!("Translation confidence: {:.0}%\n", result.confidence_score * 100.0);

    println!("KEY POINTS (what this really means):");
    for (i, point) in result.key_points.iter().enumerate() {
        println!("   {}. {point}", i + 1);
    }

    print_list("RED FLAGS", &result.red_flags);
    print_list("YOUR RIGHTS", &result.your_rights);
    print_list("ACTION ITEMS", &result.action_items);

    let path = translator.save_translation(&result, "medical_discharge_example")?;
    println!("\nDetailed report saved to: {}", path.display());

    println!("\n{}", "=".repeat(80));
    println!("PLAIN ENGLISH VERSION:");
    println!("{}", "=".repeat(80));
    println!("{}", result.plain_english);

    Ok(())
}
