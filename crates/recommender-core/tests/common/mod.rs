#![allow(dead_code)]

use recommender_core::{
    DependencyRecommender, PropertiesFileProvider, PropertySource, StaticManifestResolver,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Write a properties file into `temp` and return its path.
pub fn write_properties(temp: &TempDir, file_name: &str, content: &str) -> PathBuf {
    let path = temp.path().join(file_name);
    fs::write(&path, content).unwrap();
    path
}

pub fn properties_provider(name: &str, content: &str) -> PropertiesFileProvider {
    PropertiesFileProvider::new(PropertySource::Inline(content.to_string())).with_name(name)
}

pub fn create_recommender() -> DependencyRecommender {
    DependencyRecommender::new(Arc::new(StaticManifestResolver::new()))
}
