use habitrack_core::{Config, TitleValidator};

pub fn run(raw_title: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let validator = TitleValidator::new(config.validation.max_title_len);
    let title = validator.validate(raw_title)?;
    println!("{title}");
    Ok(())
}
