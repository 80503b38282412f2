//! Named stance snapshots persisted as a flat JSON list
//!
//! The repository keeps presets in save order. That order is also the
//! display order and the 1-based index used by load and delete.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::PresetError;
use crate::stance::StanceParameters;

/// A named, timestamped snapshot of stance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub data: StanceParameters,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

/// What happened when the backing file was read
#[derive(Debug)]
pub enum LoadStatus {
    /// No file yet; the repository is empty
    Missing,
    /// Number of presets read
    Loaded(usize),
    /// File could not be read or parsed; the repository is empty
    Failed(PresetError),
}

#[derive(Debug)]
pub struct PresetRepository {
    path: PathBuf,
    presets: Vec<Preset>,
}

impl PresetRepository {
    /// Empty repository bound to `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PresetRepository { path: path.into(), presets: Vec::new() }
    }

    /// Create the repository and read its file straight away
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut repo = Self::new(path);
        repo.load();
        repo
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Preset at a 1-based index
    pub fn get(&self, index: usize) -> Option<&Preset> {
        index.checked_sub(1).and_then(|i| self.presets.get(i))
    }

    /// Replace the in-memory list with the file contents.
    ///
    /// Never fails: a missing file or a malformed one both leave the
    /// repository empty.
    pub fn load(&mut self) -> LoadStatus {
        self.presets.clear();

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no preset file at {}", self.path.display());
                return LoadStatus::Missing;
            }
            Err(source) => {
                let err = PresetError::Io { path: self.path.clone(), source };
                warn!("{err}; starting with no presets");
                return LoadStatus::Failed(err);
            }
        };

        match serde_json::from_str::<Vec<Preset>>(&text) {
            Ok(presets) => {
                info!("loaded {} presets from {}", presets.len(), self.path.display());
                self.presets = presets;
                LoadStatus::Loaded(self.presets.len())
            }
            Err(source) => {
                let err = PresetError::Parse { path: self.path.clone(), source };
                warn!("{err}; starting with no presets");
                LoadStatus::Failed(err)
            }
        }
    }

    /// Append a snapshot of `current` and write the list back.
    ///
    /// The preset stays in memory even if the write fails. Snapshots with a
    /// non-finite value are refused, since JSON cannot represent them.
    pub fn save(&mut self, name: &str, current: &StanceParameters) -> Result<(), PresetError> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.save_at(name, current, now)
    }

    /// [`save`](Self::save) with an explicit clock reading
    pub fn save_at(
        &mut self,
        name: &str,
        current: &StanceParameters,
        now: OffsetDateTime,
    ) -> Result<(), PresetError> {
        let name = match name.trim() {
            "" => generated_name(now),
            trimmed => trimmed.to_string(),
        };

        if !current.is_finite() {
            let err = PresetError::NonFinite { name };
            warn!("{err}");
            return Err(err);
        }

        info!("saving preset '{name}'");
        self.presets.push(Preset {
            name,
            data: current.clone(),
            timestamp: now.unix_timestamp(),
        });
        self.persist()
    }

    /// Copy of the preset data at a 1-based index, or `None` when out of range
    pub fn load_preset(&self, index: usize) -> Option<StanceParameters> {
        match self.get(index) {
            Some(preset) => {
                info!("loading preset '{}'", preset.name);
                Some(preset.data.clone())
            }
            None => {
                debug!("preset index {index} out of range (have {})", self.presets.len());
                None
            }
        }
    }

    /// Remove the preset at a 1-based index and write the list back.
    ///
    /// Returns `Ok(false)` when the index is out of range. The removal is kept
    /// even if the write fails.
    pub fn delete_preset(&mut self, index: usize) -> Result<bool, PresetError> {
        if index == 0 || index > self.presets.len() {
            debug!("preset index {index} out of range (have {})", self.presets.len());
            return Ok(false);
        }

        let removed = self.presets.remove(index - 1);
        info!("deleted preset '{}'", removed.name);
        self.persist().map(|()| true)
    }

    fn persist(&self) -> Result<(), PresetError> {
        let result = self.write_file();
        if let Err(err) = &result {
            error!("failed to save presets: {err}");
        }
        result
    }

    fn write_file(&self) -> Result<(), PresetError> {
        let json = serde_json::to_string_pretty(&self.presets)?;
        let io_err = |source: std::io::Error| PresetError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, json).map_err(io_err)
    }
}

/// `Preset_YYYYMMDD_HHMMSS`
fn generated_name(now: OffsetDateTime) -> String {
    let format = format_description!("Preset_[year][month][day]_[hour][minute][second]");
    now.format(format)
        .unwrap_or_else(|_| format!("Preset_{}", now.unix_timestamp()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stance::{StanceField, WheelIndex};
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use time::macros::datetime;

    fn temp_path(tag: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("stancecore_{tag}_{}_{n}.json", std::process::id()))
    }

    fn sample_params(seed: f64) -> StanceParameters {
        let mut params = StanceParameters::new();
        params.wheel_offset = [seed, seed + 1.0, seed + 2.0, seed + 3.0];
        params.track_width = [5.5, -5.5, 10.25, 0.0];
        params.camber = [-2.5, -2.5, -1.0, -1.0];
        params.ride_height = [-30.0, -30.0, -45.0, -45.0];
        params.global_multiplier = 1.25;
        params
    }

    fn is_generated_name(name: &str) -> bool {
        let Some(rest) = name.strip_prefix("Preset_") else {
            return false;
        };
        let parts: Vec<&str> = rest.split('_').collect();
        parts.len() == 2
            && parts[0].len() == 8
            && parts[1].len() == 6
            && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit()))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let mut repo = PresetRepository::new(temp_path("missing"));
        assert!(matches!(repo.load(), LoadStatus::Missing));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let path = temp_path("malformed");
        let mut repo = PresetRepository::new(&path);
        repo.save("Stale", &StanceParameters::new()).unwrap();

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(repo.load(), LoadStatus::Failed(PresetError::Parse { .. })));
        assert!(repo.is_empty());

        fs::write(&path, "[{\"name\": 3}]").unwrap();
        assert!(matches!(repo.load(), LoadStatus::Failed(PresetError::Parse { .. })));
        assert!(repo.is_empty());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_then_reload_round_trip() {
        let path = temp_path("roundtrip");
        let params = sample_params(20.0);

        let mut repo = PresetRepository::new(&path);
        repo.save("Track A", &params).unwrap();

        let mut reloaded = PresetRepository::new(&path);
        assert!(matches!(reloaded.load(), LoadStatus::Loaded(1)));
        let preset = reloaded.get(1).unwrap();
        assert_eq!(preset.name, "Track A");
        for i in 0..4 {
            assert_relative_eq!(preset.data.wheel_offset[i], params.wheel_offset[i]);
            assert_relative_eq!(preset.data.track_width[i], params.track_width[i]);
            assert_relative_eq!(preset.data.camber[i], params.camber[i]);
            assert_relative_eq!(preset.data.ride_height[i], params.ride_height[i]);
        }
        assert_relative_eq!(preset.data.global_multiplier, 1.25);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_is_pretty_printed_in_save_order() {
        let path = temp_path("layout");
        let mut repo = PresetRepository::new(&path);
        repo.save("first", &sample_params(1.0)).unwrap();
        repo.save("second", &sample_params(2.0)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["name"], "first");
        assert_eq!(list[1]["name"], "second");
        assert!(list[0]["timestamp"].is_i64());
        assert_eq!(list[1]["data"]["wheelOffset"].as_array().unwrap().len(), 4);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_name_is_generated_from_time() {
        let path = temp_path("named");
        let mut repo = PresetRepository::new(&path);
        let now = datetime!(2024-03-05 14:07:09 UTC);

        repo.save_at("", &StanceParameters::new(), now).unwrap();
        repo.save_at("   ", &StanceParameters::new(), now).unwrap();
        assert_eq!(repo.get(1).unwrap().name, "Preset_20240305_140709");
        assert_eq!(repo.get(2).unwrap().name, "Preset_20240305_140709");
        assert_eq!(repo.get(1).unwrap().timestamp, now.unix_timestamp());

        repo.save("", &StanceParameters::new()).unwrap();
        assert!(is_generated_name(&repo.get(3).unwrap().name));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_saved_snapshot_is_decoupled_from_live_state() {
        let path = temp_path("snapshot");
        let mut live = sample_params(3.0);
        let mut repo = PresetRepository::new(&path);
        repo.save("snap", &live).unwrap();

        live.set(StanceField::WheelOffset, WheelIndex::FRONT_LEFT, -77.0);
        assert_eq!(repo.get(1).unwrap().data.wheel_offset[0], 3.0);

        let mut loaded = repo.load_preset(1).unwrap();
        loaded.set(StanceField::Camber, WheelIndex::FRONT_LEFT, 8.0);
        assert_eq!(repo.get(1).unwrap().data.camber[0], -2.5);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_preset_out_of_range() {
        let path = temp_path("range");
        let mut repo = PresetRepository::new(&path);
        assert!(repo.load_preset(0).is_none());
        assert!(repo.load_preset(1).is_none());

        repo.save("only", &sample_params(0.0)).unwrap();
        assert!(repo.load_preset(0).is_none());
        assert!(repo.load_preset(2).is_none());
        assert_eq!(repo.load_preset(1), Some(sample_params(0.0)));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_delete_shifts_later_presets() {
        let path = temp_path("delete");
        let mut repo = PresetRepository::new(&path);
        for i in 1..=5 {
            repo.save(&format!("p{i}"), &sample_params(i as f64)).unwrap();
        }

        assert!(repo.delete_preset(3).unwrap());
        let names: Vec<&str> = repo.presets().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["p1", "p2", "p4", "p5"]);
        assert_eq!(repo.get(3).unwrap().data, sample_params(4.0));

        let mut reloaded = PresetRepository::new(&path);
        assert!(matches!(reloaded.load(), LoadStatus::Loaded(4)));
        assert_eq!(reloaded.get(4).unwrap().name, "p5");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let path = temp_path("delete_range");
        let mut repo = PresetRepository::new(&path);
        repo.save("keep", &sample_params(0.0)).unwrap();

        assert!(!repo.delete_preset(0).unwrap());
        assert!(!repo.delete_preset(2).unwrap());
        assert_eq!(repo.len(), 1);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let blocker = temp_path("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let mut repo = PresetRepository::new(blocker.join("presets.json"));
        let result = repo.save("unsaved", &sample_params(0.0));
        assert!(matches!(result, Err(PresetError::Io { .. })));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(1).unwrap().name, "unsaved");
        fs::remove_file(&blocker).ok();
    }

    #[test]
    fn test_non_finite_snapshot_is_refused() {
        let path = temp_path("non_finite");
        let mut repo = PresetRepository::new(&path);
        repo.save("good", &sample_params(1.0)).unwrap();

        let mut broken = sample_params(2.0);
        broken.set_multiplier(f64::INFINITY);
        let result = repo.save("broken", &broken);
        assert!(matches!(result, Err(PresetError::NonFinite { ref name }) if name == "broken"));

        broken = sample_params(2.0);
        broken.set(StanceField::RideHeight, WheelIndex::FRONT_RIGHT, f64::NAN);
        assert!(matches!(repo.save("", &broken), Err(PresetError::NonFinite { .. })));
        assert_eq!(repo.len(), 1);

        let mut reloaded = PresetRepository::new(&path);
        assert!(matches!(reloaded.load(), LoadStatus::Loaded(1)));
        assert_eq!(reloaded.get(1).unwrap().name, "good");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = temp_path("dir").with_extension("");
        let path = dir.join("nested").join("presets.json");
        let mut repo = PresetRepository::new(&path);
        repo.save("deep", &sample_params(0.0)).unwrap();
        assert!(path.exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_open_reads_existing_file() {
        let path = temp_path("open");
        PresetRepository::new(&path).save("a", &sample_params(0.0)).unwrap();
        let repo = PresetRepository::open(&path);
        assert_eq!(repo.len(), 1);
        fs::remove_file(&path).ok();
    }
}
