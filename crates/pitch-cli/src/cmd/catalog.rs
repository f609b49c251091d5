use crate::output::{print_json, print_table};
use pitch_core::config::Config;
use pitch_core::SegmentAction;

pub fn run(config: &Config, json: bool) -> anyhow::Result<()> {
    let catalog = config.catalog()?;

    if json {
        return print_json(&catalog);
    }

    if catalog.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = catalog
        .segments()
        .iter()
        .map(|s| {
            let cue = match s.tile_cue() {
                Some(SegmentAction::PlayCue { cue }) => cue.clone(),
                Some(SegmentAction::PlayRandomCue { cues }) => cues.join(" | "),
                _ => "-".to_string(),
            };
            let actions: Vec<&str> = s.actions.iter().map(SegmentAction::kind).collect();
            vec![s.name.clone(), cue, actions.join(", ")]
        })
        .collect();
    print_table(&["NAME", "CUE", "ACTIONS"], &rows);
    Ok(())
}
