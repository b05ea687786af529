use studybuddy_core::{Config, OpenAiChat, StudyAssistant, StudyDb};

use super::resolve_now;

pub async fn run(user: &str, question: &str, now: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let now = resolve_now(now)?;
    let config = Config::load_or_default();
    let model = OpenAiChat::from_config(config.assistant.clone())?;
    let db = StudyDb::open()?;

    let assistant = StudyAssistant::new(&db, model, &config.assistant);
    let answer = assistant.ask(user, question, now).await?;
    println!("{}", answer.reply);
    Ok(())
}
