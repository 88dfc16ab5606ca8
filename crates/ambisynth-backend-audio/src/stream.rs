//! Registry of named profiles and the listener streams playing them.
//!
//! Profiles are shared; producers are not. Every [`ListenerStream`] owns a
//! fresh [`ChunkProducer`], so two listeners of one profile never touch each
//! other's generator state. The only per-profile value shared with live
//! streams is the volume, held in an atomic cell that each stream reads
//! before producing a chunk.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ambisynth_spec::{clamp_unit, Profile, ProfileError, Subtype, SynthConfig};

use crate::chunk::ChunkProducer;
use crate::error::AudioResult;
use crate::generator::validate_sample_rate;

/// Lock-free `f64` cell stored as raw bits.
#[derive(Debug)]
pub struct VolumeCell(AtomicU64);

impl VolumeCell {
    /// Creates a cell holding `volume` (clamped).
    pub fn new(volume: f64) -> Self {
        Self(AtomicU64::new(clamp_unit(volume).to_bits()))
    }

    /// Current volume.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Stores a new volume (clamped) and returns the stored value.
    pub fn set(&self, volume: f64) -> f64 {
        let clamped = clamp_unit(volume);
        self.0.store(clamped.to_bits(), Ordering::Relaxed);
        clamped
    }
}

/// A profile plus its live volume cell.
#[derive(Debug, Clone)]
struct RegisteredProfile {
    profile: Profile,
    volume: Arc<VolumeCell>,
}

impl RegisteredProfile {
    fn snapshot(&self) -> Profile {
        self.profile.clone().with_volume(self.volume.get())
    }
}

#[derive(Debug, Clone)]
struct LiveStream {
    profile: String,
    subtype: Subtype,
}

/// Concurrent profile registry.
///
/// Share it behind an [`Arc`]; every method takes `&self`.
#[derive(Debug)]
pub struct StreamRegistry {
    sample_rate: u32,
    profiles: RwLock<HashMap<String, RegisteredProfile>>,
    streams: RwLock<HashMap<u64, LiveStream>>,
    next_stream_id: AtomicU64,
}

impl StreamRegistry {
    /// Creates an empty registry producing audio at `sample_rate`.
    pub fn new(sample_rate: u32) -> AudioResult<Self> {
        validate_sample_rate(sample_rate)?;
        Ok(Self {
            sample_rate,
            profiles: RwLock::new(HashMap::new()),
            streams: RwLock::new(HashMap::new()),
            next_stream_id: AtomicU64::new(1),
        })
    }

    /// Creates a registry holding every profile in a configuration.
    pub fn from_config(config: &SynthConfig) -> AudioResult<Self> {
        let registry = Self::new(config.sample_rate)?;
        for profile in config.profiles()? {
            registry.register(profile);
        }
        Ok(registry)
    }

    /// Sample rate of streams opened from this registry.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Registers a profile under its name, returning the one it replaced.
    ///
    /// Streams already playing a replaced profile keep their old settings.
    pub fn register(&self, profile: Profile) -> Option<Profile> {
        let name = profile.name().to_string();
        let entry = RegisteredProfile {
            volume: Arc::new(VolumeCell::new(profile.volume())),
            profile,
        };
        tracing::debug!(profile = %name, "profile registered");
        self.write_profiles()
            .insert(name, entry)
            .map(|old| old.snapshot())
    }

    /// Removes a profile. Live streams of it keep playing.
    pub fn remove(&self, name: &str) -> Option<Profile> {
        let removed = self.write_profiles().remove(name).map(|old| old.snapshot());
        if removed.is_some() {
            tracing::debug!(profile = %name, "profile removed");
        }
        removed
    }

    /// Looks up a profile with its current volume.
    pub fn lookup(&self, name: &str) -> Option<Profile> {
        self.read_profiles().get(name).map(RegisteredProfile::snapshot)
    }

    /// Registered profile names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read_profiles().keys().cloned().collect();
        names.sort();
        names
    }

    /// Updates a profile's volume. Live streams pick it up on their next
    /// chunk. Returns the clamped value.
    pub fn set_volume(&self, name: &str, volume: f64) -> AudioResult<f64> {
        let profiles = self.read_profiles();
        let entry = profiles
            .get(name)
            .ok_or_else(|| ProfileError::UnknownProfile(name.to_string()))?;
        let stored = entry.volume.set(volume);
        if stored != volume {
            tracing::debug!(profile = %name, requested = volume, clamped = stored, "volume clamped");
        }
        Ok(stored)
    }

    /// Opens a listener stream with its own producer.
    pub fn open_stream(self: &Arc<Self>, name: &str) -> AudioResult<ListenerStream> {
        let entry = self
            .read_profiles()
            .get(name)
            .cloned()
            .ok_or_else(|| ProfileError::UnknownProfile(name.to_string()))?;

        let producer = ChunkProducer::from_profile(&entry.snapshot(), self.sample_rate)?;
        let id = self.next_stream_id.fetch_add(1, Ordering::Relaxed);
        self.write_streams().insert(
            id,
            LiveStream {
                profile: name.to_string(),
                subtype: producer.subtype(),
            },
        );
        tracing::debug!(stream = id, profile = %name, "stream opened");

        Ok(ListenerStream {
            id,
            profile: name.to_string(),
            producer,
            volume: entry.volume,
            registry: Arc::clone(self),
        })
    }

    /// Number of open listener streams.
    pub fn live_streams(&self) -> usize {
        self.read_streams().len()
    }

    /// Number of open listener streams playing `name`.
    pub fn streams_for(&self, name: &str) -> usize {
        self.read_streams()
            .values()
            .filter(|s| s.profile == name)
            .count()
    }

    /// Number of open listener streams synthesizing `subtype`.
    pub fn streams_of(&self, subtype: Subtype) -> usize {
        self.read_streams()
            .values()
            .filter(|s| s.subtype == subtype)
            .count()
    }

    fn close_stream(&self, id: u64) {
        if let Some(stream) = self.write_streams().remove(&id) {
            tracing::debug!(stream = id, profile = %stream.profile, "stream closed");
        }
    }

    // Every update is a single insert or remove, so a poisoned map is still
    // consistent.
    fn read_profiles(&self) -> RwLockReadGuard<'_, HashMap<String, RegisteredProfile>> {
        self.profiles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_profiles(&self) -> RwLockWriteGuard<'_, HashMap<String, RegisteredProfile>> {
        self.profiles.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_streams(&self) -> RwLockReadGuard<'_, HashMap<u64, LiveStream>> {
        self.streams.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_streams(&self) -> RwLockWriteGuard<'_, HashMap<u64, LiveStream>> {
        self.streams.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One listener's stream. Deregisters itself when dropped.
#[derive(Debug)]
pub struct ListenerStream {
    id: u64,
    profile: String,
    producer: ChunkProducer,
    volume: Arc<VolumeCell>,
    registry: Arc<StreamRegistry>,
}

impl ListenerStream {
    /// Registry-unique stream id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Name of the profile being played.
    pub fn profile_name(&self) -> &str {
        &self.profile
    }

    /// Sample rate of the produced PCM.
    pub fn sample_rate(&self) -> u32 {
        self.producer.sample_rate()
    }

    /// Produces the next chunk at the profile's current volume.
    pub fn next_chunk(&mut self, count: usize) -> Vec<u8> {
        self.producer.set_volume(self.volume.get());
        self.producer.next_chunk(count)
    }

    /// The underlying producer.
    pub fn producer(&self) -> &ChunkProducer {
        &self.producer
    }
}

impl Drop for ListenerStream {
    fn drop(&mut self) {
        self.registry.close_stream(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AudioError;

    fn registry() -> Arc<StreamRegistry> {
        let registry = StreamRegistry::new(44_100).unwrap();
        registry.register(
            Profile::new("Rainy", Subtype::Rain)
                .with_seed(Some(42))
                .with_volume(0.8),
        );
        registry.register(Profile::new("Hiss", Subtype::White));
        Arc::new(registry)
    }

    #[test]
    fn test_volume_cell_clamps() {
        let cell = VolumeCell::new(3.0);
        assert_eq!(cell.get(), 1.0);
        assert_eq!(cell.set(-0.5), 0.0);
        assert_eq!(cell.set(0.25), 0.25);
        assert_eq!(cell.get(), 0.25);
    }

    #[test]
    fn test_register_lookup_remove() {
        let registry = registry();
        assert_eq!(registry.names(), vec!["Hiss".to_string(), "Rainy".to_string()]);
        assert_eq!(registry.lookup("Rainy").unwrap().subtype(), Subtype::Rain);

        let replaced = registry.register(Profile::new("Hiss", Subtype::Pink));
        assert_eq!(replaced.unwrap().subtype(), Subtype::White);

        assert!(registry.remove("Hiss").is_some());
        assert!(registry.remove("Hiss").is_none());
        assert!(registry.lookup("Hiss").is_none());
    }

    #[test]
    fn test_unknown_profile() {
        let registry = registry();
        assert!(matches!(
            registry.open_stream("Nope"),
            Err(AudioError::Profile(ProfileError::UnknownProfile(_)))
        ));
        assert!(registry.set_volume("Nope", 0.5).is_err());
    }

    #[test]
    fn test_seeded_listeners_are_identical_and_independent() {
        let registry = registry();
        let mut a = registry.open_stream("Rainy").unwrap();
        let mut b = registry.open_stream("Rainy").unwrap();
        assert_ne!(a.id(), b.id());

        let a1 = a.next_chunk(4096);
        let a2 = a.next_chunk(4096);
        // b starts from the beginning regardless of how far a has run.
        let b1 = b.next_chunk(4096);
        assert_eq!(a1, b1);
        assert_eq!(a2, b.next_chunk(4096));
    }

    #[test]
    fn test_drop_deregisters() {
        let registry = registry();
        let a = registry.open_stream("Rainy").unwrap();
        let b = registry.open_stream("Hiss").unwrap();
        assert_eq!(registry.live_streams(), 2);
        assert_eq!(registry.streams_for("Rainy"), 1);
        assert_eq!(registry.streams_of(Subtype::White), 1);
        drop(a);
        assert_eq!(registry.live_streams(), 1);
        assert_eq!(registry.streams_for("Rainy"), 0);
        drop(b);
        assert_eq!(registry.live_streams(), 0);
    }

    #[test]
    fn test_live_volume_update_reaches_open_stream() {
        let registry = registry();
        let mut stream = registry.open_stream("Hiss").unwrap();
        stream.next_chunk(10);
        assert_eq!(registry.set_volume("Hiss", 0.0).unwrap(), 0.0);
        assert!(stream.next_chunk(256).iter().all(|&b| b == 0));
        assert_eq!(registry.set_volume("Hiss", 5.0).unwrap(), 1.0);
        assert_eq!(registry.lookup("Hiss").unwrap().volume(), 1.0);
    }

    #[test]
    fn test_removed_profile_keeps_streaming() {
        let registry = registry();
        let mut stream = registry.open_stream("Rainy").unwrap();
        registry.remove("Rainy");
        assert_eq!(stream.next_chunk(100).len(), 200);
        assert_eq!(registry.live_streams(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = SynthConfig::from_json(
            r#"{"sample_rate": 22050, "profiles": [
                {"name": "Fan", "type": "ambient", "subtype": "fan"}
            ]}"#,
        )
        .unwrap();
        let registry = Arc::new(StreamRegistry::from_config(&config).unwrap());
        let stream = registry.open_stream("Fan").unwrap();
        assert_eq!(stream.sample_rate(), 22_050);
    }
}
