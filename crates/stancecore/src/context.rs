use crate::applier::{ApplyOutcome, StanceApplier};
use crate::config::StanceConfig;
use crate::host::Host;
use crate::preset::PresetRepository;
use crate::stance::StanceParameters;

/// Everything the panel reads and writes, owned by the process entry point
#[derive(Debug)]
pub struct StanceContext {
    pub stance: StanceParameters,
    pub presets: PresetRepository,
}

impl StanceContext {
    pub fn new(presets: PresetRepository) -> Self {
        StanceContext { stance: StanceParameters::default(), presets }
    }

    /// Zeroed stance and presets read from the configured file
    pub fn from_config(config: &StanceConfig) -> Self {
        Self::new(PresetRepository::open(&config.preset_path))
    }

    /// Install the preset at a 1-based index and push it to the host.
    ///
    /// Returns `false` without touching anything when the index is out of range.
    pub fn install_preset(&mut self, index: usize, host: &mut dyn Host) -> bool {
        match self.presets.load_preset(index) {
            Some(data) => {
                self.stance = data;
                self.apply(host);
                true
            }
            None => false,
        }
    }

    pub fn apply(&self, host: &mut dyn Host) -> ApplyOutcome {
        StanceApplier::apply(&self.stance, host)
    }
}
