use anyhow::Result;
use appointer_core::parse::parse_event;
use appointer_core::time::today;

use crate::render::Render;

pub fn run(text: &str, json: bool) -> Result<()> {
    let request = parse_event(text, today())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&request)?);
    } else {
        println!("{}", request.render());
    }

    Ok(())
}
