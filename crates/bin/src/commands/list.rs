//! List command - prints the messages in the store.

use postbox::{
    Config, Message,
    store::{Entries, JsonFileStore, MessageStore},
};

use crate::output::{OutputFormat, print_table};

/// Run the list command
pub async fn run(config: &Config, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::at(config.data_file_path());
    let entries = match store.load().await {
        Ok(entries) => entries,
        Err(e) if e.is_not_found() => Entries::new(),
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No messages stored.");
                return Ok(());
            }
            print_table(&["TIMESTAMP", "USERNAME", "MESSAGE"], &rows(&entries));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

fn rows(entries: &Entries) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|(timestamp, entry)| {
            let (username, message) = match serde_json::from_value::<Message>(entry.clone()) {
                Ok(msg) if entry.is_object() => (msg.username, msg.message),
                // Not a message object; show it raw.
                _ => (String::new(), entry.to_string()),
            };
            vec![timestamp.clone(), username, message.replace('\n', " ")]
        })
        .collect()
}
