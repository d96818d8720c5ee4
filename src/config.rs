use std::path::PathBuf;

/// Credential type tag used by the standardized API.
pub const STANDARD_TYPE: &str = "public-key";
/// Credential type tag the legacy platform uses in place of `public-key`.
pub const LEGACY_TYPE: &str = "FIDO_2_0";
pub const STANDARD_RS256: &str = "RS256";
pub const LEGACY_RS256: &str = "RSASSA-PKCS1-v1_5";

pub const SCHEMA_VERSION: i64 = 1;
pub const IDENTITY_TABLE: &str = "identities";
pub const DB_FILE_NAME: &str = "webauthn.sqlite3";

#[derive(clap::Parser, Debug, Clone)]
pub struct Config {
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Path of the identity ledger database. Defaults to the XDG data dir.
    #[arg(long)]
    pub db: Option<PathBuf>,
    /// Print every registered identity as a JSON line, then exit.
    #[arg(long, conflicts_with = "wipe")]
    pub list: bool,
    /// Delete the identity ledger database, then exit.
    #[arg(long)]
    pub wipe: bool,
}

impl Config {
    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        match &self.db {
            Some(path) => Ok(path.clone()),
            None => default_db_path(),
        }
    }
}

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "webauthn-shim")
        .ok_or_else(|| anyhow::anyhow!("cannot determine XDG data dir"))?;
    Ok(dirs.data_dir().join(DB_FILE_NAME))
}
