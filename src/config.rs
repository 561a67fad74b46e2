use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::analysis::{Analyzer, ChainTokenizer, ExactMatchTokenizer, NopTokenizer, StandardTokenizer, Tokenizer};
use crate::error::{Result, ServiceError};
use crate::model::SearchField;

/// Command-line flags for the server binary.
#[derive(Debug, Parser)]
#[command(name = "metadex-server", version)]
pub struct ServerArgs {
    /// HTTP listen address.
    #[arg(short = 'a', long = "addr", default_value = ":8080")]
    pub addr: String,

    /// Verbose (debug-level) logging.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Directory containing analyzer.json.
    #[arg(short = 'c', long = "conf", default_value = "./conf")]
    pub conf: PathBuf,
}

#[derive(Debug, Deserialize)]
struct TokenizerDef {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    config: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct AnalyzerConfigFile {
    #[serde(rename = "tokenizerConfig")]
    tokenizer_config: Vec<TokenizerDef>,
    #[serde(rename = "fieldConfig")]
    field_config: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Default)]
struct StandardConfig {
    #[serde(default, rename = "stopWords")]
    stop_words: Option<Vec<String>>,
    #[serde(default)]
    separator: Option<String>,
    #[serde(default)]
    cutset: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ChainConfig {
    #[serde(default)]
    tokenizers: Vec<String>,
}

/// Reads `{conf}/analyzer.json` and builds an `Analyzer`. A missing file is
/// not an error — it falls back to the built-in default mapping; a
/// malformed file or a reference to an undefined tokeniser is fatal.
pub fn load_analyzer(conf_dir: &Path) -> Result<Analyzer> {
    let path = conf_dir.join("analyzer.json");
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no analyzer config, using defaults");
            return Ok(Analyzer::default());
        }
        Err(err) => return Err(ServiceError::Config(err.to_string())),
    };

    let parsed: AnalyzerConfigFile = serde_json::from_str(&raw)
        .map_err(|err| ServiceError::Config(format!("analyzer.json: {err}")))?;

    let mut built: HashMap<String, Box<dyn Tokenizer>> = HashMap::new();
    for def in &parsed.tokenizer_config {
        let tokenizer = build_tokenizer(def, &built)?;
        built.insert(def.name.clone(), tokenizer);
    }

    let mut mapping: HashMap<SearchField, Box<dyn Tokenizer>> = HashMap::new();
    for (field_name, tokenizer_name) in &parsed.field_config {
        let field: SearchField = field_name
            .parse()
            .map_err(|_| ServiceError::Config(format!("unknown search field '{field_name}'")))?;
        if field == SearchField::Any {
            return Err(ServiceError::Config("'any' cannot be configured in fieldConfig".into()));
        }
        let tokenizer = built
            .get(tokenizer_name)
            .ok_or_else(|| ServiceError::Config(format!("undefined tokenizer '{tokenizer_name}'")))?;
        mapping.insert(field, tokenizer.clone_box());
    }

    Ok(Analyzer::new(mapping))
}

fn build_tokenizer(
    def: &TokenizerDef,
    built_so_far: &HashMap<String, Box<dyn Tokenizer>>,
) -> Result<Box<dyn Tokenizer>> {
    match def.kind.as_str() {
        "ExactMatch" => Ok(Box::new(ExactMatchTokenizer)),
        "Nop" => Ok(Box::new(NopTokenizer)),
        "Standard" => {
            let cfg: StandardConfig = serde_json::from_value(def.config.clone())
                .map_err(|err| ServiceError::Config(format!("tokenizer '{}': {err}", def.name)))?;
            let mut tokenizer = StandardTokenizer::new();
            if let Some(stop_words) = cfg.stop_words {
                tokenizer = tokenizer.with_stop_words(stop_words);
            }
            if let Some(separator) = cfg.separator {
                tokenizer = tokenizer.with_separator(separator);
            }
            if let Some(cutset) = cfg.cutset {
                tokenizer = tokenizer.with_cutset(&cutset);
            }
            Ok(Box::new(tokenizer))
        }
        "Chain" => {
            let cfg: ChainConfig = serde_json::from_value(def.config.clone())
                .map_err(|err| ServiceError::Config(format!("tokenizer '{}': {err}", def.name)))?;
            let mut inner = Vec::with_capacity(cfg.tokenizers.len());
            for name in &cfg.tokenizers {
                let tokenizer = built_so_far
                    .get(name)
                    .ok_or_else(|| ServiceError::Config(format!("undefined tokenizer '{name}'")))?;
                inner.push(tokenizer.clone_box());
            }
            Ok(Box::new(ChainTokenizer::new(inner)))
        }
        other => Err(ServiceError::Config(format!("unknown tokenizer type '{other}'"))),
    }
}
