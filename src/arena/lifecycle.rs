//! Ownership of generated layers across regenerations.
//!
//! The renderer sits behind [`LayerSink`]: it turns a batch into whatever
//! handle it needs and gets every handle back exactly once on release. Old
//! layers are found through those handles, never by scanning the scene.

use super::generator::{self, LayerBatch};
use super::{GridConfig, InvalidConfig};

/// Rendering collaborator that uploads batches and releases their resources.
pub trait LayerSink {
    /// Whatever the sink needs to later free one uploaded batch.
    type Handle;

    /// Uploads `batch`, returning the handle owning its resources.
    fn upload(&mut self, batch: &LayerBatch) -> Self::Handle;

    /// Frees everything behind `handle`.
    fn release(&mut self, handle: Self::Handle);
}

/// A batch together with the sink handle that owns its resources.
#[derive(Debug)]
pub struct OwnedLayer<H> {
    /// Generated batch.
    pub batch: LayerBatch,
    /// Sink-side resources.
    pub handle: H,
}

/// Owns the current layer set and swaps it wholesale on regeneration.
#[derive(Debug)]
pub struct GridLifecycle<H> {
    layers: Vec<OwnedLayer<H>>,
    generation: u64,
}

impl<H> Default for GridLifecycle<H> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            generation: 0,
        }
    }
}

impl<H> GridLifecycle<H> {
    /// Lifecycle owning no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the owned layers with a full rebuild from `cfg`.
    ///
    /// Generation runs first; on [`InvalidConfig`] the current layers are left
    /// untouched. Otherwise every current layer is released before the new
    /// batches are uploaded.
    pub fn regenerate<S>(
        &mut self,
        cfg: &GridConfig,
        sink: &mut S,
    ) -> Result<&[OwnedLayer<H>], InvalidConfig>
    where
        S: LayerSink<Handle = H>,
    {
        let batches = generator::generate(cfg)?;
        self.dispose(sink);
        self.layers = batches
            .into_iter()
            .map(|batch| {
                let handle = sink.upload(&batch);
                OwnedLayer { batch, handle }
            })
            .collect();
        self.generation += 1;
        Ok(&self.layers)
    }

    /// Releases every owned layer. A no-op when nothing is owned.
    pub fn dispose<S>(&mut self, sink: &mut S)
    where
        S: LayerSink<Handle = H>,
    {
        for layer in self.layers.drain(..) {
            sink.release(layer.handle);
        }
    }

    /// Currently owned layers.
    pub fn layers(&self) -> &[OwnedLayer<H>] {
        &self.layers
    }

    /// Whether no layers are owned.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Total instances across owned layers.
    pub fn instance_count(&self) -> usize {
        self.layers.iter().map(|l| l.batch.instance_count()).sum()
    }

    /// Number of successful regenerations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Region;
    use bevy::prelude::default;

    /// Records uploads and releases; handles are sequential ids.
    #[derive(Default)]
    struct RecordingSink {
        next_id: u32,
        live: Vec<u32>,
        released: Vec<u32>,
    }

    impl LayerSink for RecordingSink {
        type Handle = u32;

        fn upload(&mut self, _batch: &LayerBatch) -> u32 {
            let id = self.next_id;
            self.next_id += 1;
            self.live.push(id);
            id
        }

        fn release(&mut self, handle: u32) {
            self.live.retain(|&id| id != handle);
            self.released.push(handle);
        }
    }

    fn non_empty_cells(cfg: &GridConfig) -> usize {
        generator::generate_cells(cfg)
            .unwrap()
            .iter()
            .filter(|c| c.region != Region::Empty)
            .count()
    }

    #[test]
    fn regenerate_uploads_one_handle_per_batch() {
        let mut sink = RecordingSink::default();
        let mut lifecycle = GridLifecycle::new();
        let cfg = GridConfig::default();
        let n = lifecycle.regenerate(&cfg, &mut sink).unwrap().len();
        assert_eq!(sink.live.len(), n);
        assert_eq!(lifecycle.instance_count(), non_empty_cells(&cfg));
        assert_eq!(lifecycle.generation(), 1);
    }

    #[test]
    fn shrinking_radius_leaves_no_stale_layers() {
        let mut sink = RecordingSink::default();
        let mut lifecycle = GridLifecycle::new();
        let big = GridConfig {
            radius: 30,
            ..default()
        };
        let small = GridConfig {
            radius: 8,
            ..default()
        };
        let first = lifecycle.regenerate(&big, &mut sink).unwrap().len();
        lifecycle.regenerate(&small, &mut sink).unwrap();

        assert_eq!(sink.released.len(), first);
        assert_eq!(sink.live.len(), lifecycle.layers().len());
        assert_eq!(lifecycle.instance_count(), non_empty_cells(&small));
    }

    #[test]
    fn invalid_config_keeps_previous_layers() {
        let mut sink = RecordingSink::default();
        let mut lifecycle = GridLifecycle::new();
        lifecycle
            .regenerate(&GridConfig::default(), &mut sink)
            .unwrap();
        let before = lifecycle.instance_count();

        let bad = GridConfig {
            path_scale_factor: f32::INFINITY,
            ..default()
        };
        assert!(lifecycle.regenerate(&bad, &mut sink).is_err());
        assert!(sink.released.is_empty());
        assert_eq!(lifecycle.instance_count(), before);
        assert_eq!(lifecycle.generation(), 1);
    }

    #[test]
    fn dispose_releases_everything_once() {
        let mut sink = RecordingSink::default();
        let mut lifecycle = GridLifecycle::new();
        let n = lifecycle
            .regenerate(&GridConfig::default(), &mut sink)
            .unwrap()
            .len();
        lifecycle.dispose(&mut sink);
        assert!(lifecycle.is_empty());
        assert!(sink.live.is_empty());
        assert_eq!(sink.released.len(), n);

        lifecycle.dispose(&mut sink);
        assert_eq!(sink.released.len(), n);
    }

    #[test]
    fn dispose_on_fresh_lifecycle_is_noop() {
        let mut sink = RecordingSink::default();
        let mut lifecycle: GridLifecycle<u32> = GridLifecycle::new();
        lifecycle.dispose(&mut sink);
        assert!(lifecycle.is_empty());
        assert!(sink.released.is_empty());
    }

    #[test]
    fn all_empty_config_owns_nothing() {
        let mut sink = RecordingSink::default();
        let mut lifecycle = GridLifecycle::new();
        let cfg = GridConfig {
            radius: 1,
            base_scale_factor: 0.01,
            arena_scale_factor: 0.01,
            path_scale_factor: 0.01,
            ..default()
        };
        assert!(lifecycle.regenerate(&cfg, &mut sink).unwrap().is_empty());
        assert!(sink.live.is_empty());
    }
}
