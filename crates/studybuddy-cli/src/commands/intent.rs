use studybuddy_core::analyze_intent;

pub fn run(question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let intent = analyze_intent(question);
    println!("{}", intent.as_str());
    Ok(())
}
