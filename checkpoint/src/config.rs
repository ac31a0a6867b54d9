//! System configuration.

/// Knobs for the checkpoint system. `Default` carries the production values;
/// embedders override fields as needed before constructing the system.
#[derive(Clone, Debug)]
pub struct Config {
    /// Key the serialized ledger is stored under in the host settings store.
    pub storage_key: String,
    /// Facility subtype tags that must never be selected. Ships with the
    /// medical-room variant of the incompatible alternate survival ruleset.
    pub denied_subtypes: Vec<String>,
    /// Message shown to a player after a successful relocation.
    pub notification_text: String,
    /// How long the notification stays on screen.
    pub notification_duration_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: "medbay_checkpoint.last_died_location".to_string(),
            denied_subtypes: vec!["CythonSuitMedicalRoom".to_string()],
            notification_text:
                "You got teleported to the Medical Room nearest to the location you died at."
                    .to_string(),
            notification_duration_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_denylist_excludes_the_suit_medical_room() {
        let config = Config::default();
        assert!(
            config
                .denied_subtypes
                .iter()
                .any(|tag| tag == "CythonSuitMedicalRoom")
        );
        assert_eq!(config.notification_duration_ms, 5000);
    }
}
