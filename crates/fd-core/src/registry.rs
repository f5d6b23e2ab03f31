//! In-memory asset registry.
//!
//! One [`AssetRegistry`] is built at startup and shared by handle with every
//! request. A single mutex guards all three maps; it is only ever held for
//! the map access itself, never across file I/O or tool invocations.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::asset::{AudioAsset, ImageAsset, VideoAsset};
use crate::error::{Error, Result};
use crate::ids::AssetId;

/// The three per-kind maps behind the registry lock.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct Maps {
    videos: HashMap<AssetId, Arc<VideoAsset>>,
    images: HashMap<AssetId, Arc<ImageAsset>>,
    audios: HashMap<AssetId, Arc<AudioAsset>>,
}

/// A record type the registry can hold.
pub trait AssetKind: Send + Sync + 'static {
    /// Human-readable kind, used in "unknown <kind> id" errors.
    const KIND: &'static str;

    /// The record's identifier.
    fn id(&self) -> &AssetId;

    #[doc(hidden)]
    fn map(maps: &mut Maps) -> &mut HashMap<AssetId, Arc<Self>>;
}

impl AssetKind for VideoAsset {
    const KIND: &'static str = "video";

    fn id(&self) -> &AssetId {
        &self.id
    }

    fn map(maps: &mut Maps) -> &mut HashMap<AssetId, Arc<Self>> {
        &mut maps.videos
    }
}

impl AssetKind for ImageAsset {
    const KIND: &'static str = "image";

    fn id(&self) -> &AssetId {
        &self.id
    }

    fn map(maps: &mut Maps) -> &mut HashMap<AssetId, Arc<Self>> {
        &mut maps.images
    }
}

impl AssetKind for AudioAsset {
    const KIND: &'static str = "audio";

    fn id(&self) -> &AssetId {
        &self.id
    }

    fn map(maps: &mut Maps) -> &mut HashMap<AssetId, Arc<Self>> {
        &mut maps.audios
    }
}

/// Process-lifetime store of every ingested asset, keyed by id.
///
/// There is no update or delete: a record lives until the process exits.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    maps: Mutex<Maps>,
}

impl AssetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under its id.
    ///
    /// Returns [`Error::Conflict`] if the id is already taken; the existing
    /// record is left untouched.
    pub fn register<A: AssetKind>(&self, asset: A) -> Result<Arc<A>> {
        let asset = Arc::new(asset);
        let mut maps = self.maps.lock();
        let map = A::map(&mut maps);
        if map.contains_key(asset.id()) {
            return Err(Error::Conflict(format!(
                "{} id already registered: {}",
                A::KIND,
                asset.id()
            )));
        }
        map.insert(asset.id().clone(), Arc::clone(&asset));
        Ok(asset)
    }

    /// Look a record up by id.
    pub fn lookup<A: AssetKind>(&self, id: &AssetId) -> Option<Arc<A>> {
        let mut maps = self.maps.lock();
        A::map(&mut maps).get(id).cloned()
    }

    /// Look a record up, turning a miss into [`Error::UnknownAsset`].
    pub fn resolve<A: AssetKind>(&self, id: &AssetId) -> Result<Arc<A>> {
        self.lookup::<A>(id)
            .ok_or_else(|| Error::unknown_asset(A::KIND, id))
    }

    /// Number of records of kind `A`.
    pub fn count<A: AssetKind>(&self) -> usize {
        let mut maps = self.maps.lock();
        A::map(&mut maps).len()
    }
}
