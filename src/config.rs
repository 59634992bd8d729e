use std::path::Path;

use anyhow::Context;
use confique::Config as DeriveConfig;

#[derive(Debug, DeriveConfig)]
pub struct Config {
    /// Member names allowed to carry numbers or booleans encoded as strings,
    /// e.g. identifiers that merely look numeric. The `stringly-scalars`
    /// lint will not report them.
    #[config(default = [])]
    pub allowed_stringly_members: Vec<String>,

    /// Whether to report members whose value is `null`. Lenient decoding
    /// substitutes the member type's default for these.
    #[config(default = true)]
    pub flag_null_members: bool,
}

pub fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file `{}` does not exist", path.display());
            }
            Config::builder().file(path).load()
        }
        None => Config::builder().file("laxjson.toml").load(),
    };
    config.context("failed to load lint configuration")
}
