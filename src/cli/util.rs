//! CLI utility helpers

use clap::Args;
use regshift::{ConfigOverrides, MissingPayload, RewriteConfig};

/// Flags overriding the structural names
#[derive(Args, Debug, Clone, Default)]
pub struct NameArgs {
    /// Member name of the call to rewrite
    #[arg(long)]
    pub target_selector: Option<String>,

    /// Field whose value becomes the payload
    #[arg(long)]
    pub payload_key: Option<String>,

    /// Package qualifier for emitted names
    #[arg(long)]
    pub namespace: Option<String>,

    /// Member name of the emitted call
    #[arg(long)]
    pub register_function: Option<String>,

    /// Type of the emitted composite
    #[arg(long)]
    pub result_type: Option<String>,

    /// Type of the emitted metadata composite
    #[arg(long)]
    pub metadata_type: Option<String>,

    /// Field name holding the metadata composite
    #[arg(long)]
    pub metadata_key: Option<String>,

    /// Emit `nil` for a missing payload instead of failing the file
    #[arg(long)]
    pub allow_missing_payload: bool,
}

impl NameArgs {
    /// Defaults merged with whatever flags were given
    pub fn to_config(&self) -> RewriteConfig {
        let overrides = ConfigOverrides {
            target_selector: self.target_selector.clone(),
            payload_key: self.payload_key.clone(),
            namespace: self.namespace.clone(),
            register_function: self.register_function.clone(),
            result_type: self.result_type.clone(),
            metadata_type: self.metadata_type.clone(),
            metadata_key: self.metadata_key.clone(),
            missing_payload: self
                .allow_missing_payload
                .then_some(MissingPayload::EmitNil),
        };
        RewriteConfig::default().merge(&overrides)
    }
}

/// Install the tracing subscriber; `RUST_LOG` wins over `verbose`
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "regshift=debug" } else { "regshift=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
