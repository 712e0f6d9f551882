#![allow(dead_code)]

use cmdsense_model::archive::{
    COMMANDS_MODEL_JSON, COMMANDS_MODEL_ZIP, PREDICTIONS_MODEL_JSON, PREDICTIONS_MODEL_ZIP,
};
use cmdsense_model::{DataLayout, ModelStore, StoreConfig};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::FileOptions;

pub const COMMANDS_JSON: &str = r#"{
    "5.0.0": [
        {"suggestion": "Get-AzSubscription"}
    ],
    "5.1.0": [
        {"suggestion": "Connect-AzAccount", "description": "Sign in"},
        {"suggestion": "Get-AzContext"},
        {"suggestion": "New-AzResourceGroup -Location *** -Name ***"}
    ]
}"#;

pub const PREDICTIONS_JSON: &str = r#"{
    "5.1.0": {
        "Connect-AzAccount": [
            {"suggestion": "Get-AzContext"},
            {"suggestion": "Set-AzContext -Subscription ***"}
        ],
        "Get-Item": [
            {"suggestion": "Remove-Item -Path ***"}
        ]
    }
}"#;

/// Write a zip archive holding the given entries.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    for (name, content) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

/// A base directory with `Data/` holding both model archives.
pub fn model_dir(commands_json: &str, predictions_json: &str) -> TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    let data_dir = temp_dir.path().join("Data");
    std::fs::create_dir(&data_dir).unwrap();
    write_zip(
        &data_dir.join(COMMANDS_MODEL_ZIP),
        &[(COMMANDS_MODEL_JSON, commands_json)],
    );
    write_zip(
        &data_dir.join(PREDICTIONS_MODEL_ZIP),
        &[(PREDICTIONS_MODEL_JSON, predictions_json)],
    );
    temp_dir
}

pub fn store_for(dir: &TempDir, config: StoreConfig) -> ModelStore {
    ModelStore::from_layout(DataLayout::new(dir.path()), config)
}
