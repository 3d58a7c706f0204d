use crate::commands::{CardzPaths, CmdMessage, CmdResult};
use crate::config::CardzConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &CardzPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data;
    match action {
        ConfigAction::ShowAll => {
            let config = CardzConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = CardzConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = CardzConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to {}", key, display_val)))
                .with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::CardOrder;
    use tempfile::tempdir;

    #[test]
    fn set_then_show() {
        let dir = tempdir().unwrap();
        let paths = CardzPaths {
            data: dir.path().to_path_buf(),
        };
        let res = run(&paths, ConfigAction::Set("card_order".into(), "alpha".into())).unwrap();
        assert_eq!(res.messages[0].content, "card_order set to alphabetical");
        assert_eq!(res.config.unwrap().card_order, CardOrder::Alphabetical);

        let res = run(&paths, ConfigAction::ShowKey("card_order".into())).unwrap();
        assert_eq!(res.messages[0].content, "alphabetical");

        let res = run(&paths, ConfigAction::ShowAll).unwrap();
        assert!(res.config.is_some());
    }

    #[test]
    fn unknown_key_is_an_error_message() {
        let dir = tempdir().unwrap();
        let paths = CardzPaths {
            data: dir.path().to_path_buf(),
        };
        let res = run(&paths, ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Error);
        let res = run(&paths, ConfigAction::Set("colour".into(), "red".into())).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }
}
