//! Loads the deposit parameters supplied by the user.

use std::{fs, path::Path};

use strata_reclaim_tx_builder::params::ReclaimParams;
use tracing::debug;

use crate::errors::ConfigError;

/// Parse the params at the given path and check that they are well-formed.
pub(crate) fn load_params(path: impl AsRef<Path>) -> Result<ReclaimParams, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let params = toml::from_str::<ReclaimParams>(&contents)?;
    params.check_well_formed()?;

    debug!(path = %path.display(), network = %params.network, "loaded params");

    Ok(params)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use strata_reclaim_tx_builder::errors::ParamsError;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_params(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("should create temp file");
        file.write_all(contents.as_bytes())
            .expect("should write params");

        file
    }

    #[test]
    fn test_load_params() {
        let params = ReclaimParams::testnet();
        let file = write_params(&toml::to_string(&params).unwrap());

        assert_eq!(
            load_params(file.path()).unwrap(),
            params,
            "params should survive being written to and read from a file"
        );
    }

    #[test]
    fn test_load_alternate_params() {
        let file = write_params(
            r#"
            network = "signet"
            internal_key = "93c7378d96518a75448821c4f7c8f4bae7ce60f804d03d1f0628dd5dd0f5de51"
            verifier_keys = [
                "9fb3a961d8b1f4ec1caa220c6a50b815febc0b689ddf0b9ddfbf99cb74479e41",
                "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            ]
            chain_tag = "737472617461"
            bridge_amount = 100000000
            reclaim_after_blocks = 144
            "#,
        );

        let params = load_params(file.path()).unwrap();

        assert_eq!(params.network, bitcoin::Network::Signet);
        assert_eq!(params.verifier_keys.len(), 2);
        assert_eq!(params.chain_tag, b"strata");
        assert_eq!(params.bridge_amount.to_sat(), 100_000_000);
        assert_eq!(params.reclaim_sequence().to_consensus_u32(), 145);
    }

    #[test]
    fn test_load_params_errors() {
        let missing = tempfile::tempdir().unwrap().path().join("missing.toml");
        assert!(matches!(load_params(missing), Err(ConfigError::Io { .. })));

        let file = write_params("network = \"testnet\"");
        assert!(matches!(
            load_params(file.path()),
            Err(ConfigError::Malformed(_))
        ));

        let mut params = ReclaimParams::testnet();
        params.verifier_keys.clear();
        let file = write_params(&toml::to_string(&params).unwrap());
        assert!(
            matches!(
                load_params(file.path()),
                Err(ConfigError::InvalidParams(ParamsError::NoVerifierKeys))
            ),
            "params should be checked after parsing"
        );
    }
}
