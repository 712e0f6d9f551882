use cmdsense_model::{
    CommandCollection, Dataset, ModelStore, PredictionCollection, PredictiveCommand,
};

pub fn stats(store: &ModelStore) -> cmdsense_model::Result<String> {
    let config = store.config();
    let commands = store.commands()?;
    let predictions = store.predictions()?;

    let mut out = format!(
        "{} {}: {} commands\n",
        Dataset::Commands,
        config.commands_version,
        commands.len()
    );
    out.push_str(&format!(
        "{} {}: {} triggers, {} suggestions\n",
        Dataset::Predictions,
        config.predictions_version,
        predictions.len(),
        predictions.total_suggestions()
    ));
    Ok(out)
}

pub fn commands(collection: &CommandCollection, limit: Option<usize>) -> String {
    let mut out = String::new();
    for command in collection.iter().take(limit.unwrap_or(usize::MAX)) {
        push_command(&mut out, command);
    }
    out
}

pub fn next(collection: &PredictionCollection, trigger: &str) -> String {
    let Some(follow_ups) = collection.get(trigger) else {
        return format!("No suggestions after '{}'\n", trigger);
    };
    let mut out = String::new();
    for command in follow_ups {
        push_command(&mut out, command);
    }
    out
}

fn push_command(out: &mut String, command: &PredictiveCommand) {
    out.push_str(command.command());
    if let Some(description) = command.description() {
        out.push_str("  # ");
        out.push_str(description);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdsense_model::table::TriggerEntries;
    use cmdsense_model::{DuplicateTriggerPolicy, RawModelEntry};

    fn sample_commands() -> CommandCollection {
        CommandCollection::build(vec![
            RawModelEntry::new("Connect-AzAccount").with_description("Sign in"),
            RawModelEntry::new("Get-AzContext"),
            RawModelEntry::new("Get-AzVM"),
        ])
        .unwrap()
    }

    #[test]
    fn test_commands_output() {
        assert_eq!(
            commands(&sample_commands(), None),
            "Connect-AzAccount  # Sign in\nGet-AzContext\nGet-AzVM\n"
        );
        assert_eq!(
            commands(&sample_commands(), Some(1)),
            "Connect-AzAccount  # Sign in\n"
        );
    }

    #[test]
    fn test_next_output() {
        let mut triggers = TriggerEntries::new();
        triggers.push(
            "Get-Item",
            vec![
                RawModelEntry::new("Set-Item -Value ***"),
                RawModelEntry::new("Remove-Item"),
            ],
        );
        let predictions =
            PredictionCollection::build(triggers, DuplicateTriggerPolicy::Reject).unwrap();

        assert_eq!(
            next(&predictions, "Get-Item"),
            "Set-Item -Value ***\nRemove-Item\n"
        );
        assert_eq!(
            next(&predictions, "Get-AzVM"),
            "No suggestions after 'Get-AzVM'\n"
        );
    }
}
