//! Renderer plugin registration.
//!
//! Registration is an explicit call made once while the host sets up its
//! renderers; nothing is registered as a side effect of linking this crate.

use std::collections::BTreeMap;

use crate::config::PictureConfig;
use crate::host::GpuContext;
use crate::renderer::{ObjectRenderer, PictureRenderer};

/// Name the picture renderer is registered under.
pub const PICTURE_PLUGIN: &str = "picture";

/// Boxed constructor stored by a registry.
pub type Constructor<P> = Box<dyn Fn() -> Box<P>>;

/// Name → constructor table for one renderer backend.
///
/// `P` is the backend's plugin interface, e.g. `dyn ObjectRenderer<C>` for
/// the GPU path or the host's own software sprite renderer trait.
pub struct PluginRegistry<P: ?Sized> {
    constructors: BTreeMap<&'static str, Constructor<P>>,
}

impl<P: ?Sized> Default for PluginRegistry<P> {
    fn default() -> Self {
        Self { constructors: BTreeMap::new() }
    }
}

impl<P: ?Sized> PluginRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `constructor` under `name`, replacing any previous entry.
    pub fn register_plugin<F>(&mut self, name: &'static str, constructor: F)
    where
        F: Fn() -> Box<P> + 'static,
    {
        if self.constructors.insert(name, Box::new(constructor)).is_some() {
            log::debug!("plugin '{name}' re-registered; previous constructor replaced");
        } else {
            log::debug!("plugin '{name}' registered");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Instantiates the plugin registered under `name`.
    pub fn create(&self, name: &str) -> Option<Box<P>> {
        self.constructors.get(name).map(|ctor| ctor())
    }

    /// Instantiates every registered plugin, in name order.
    pub fn create_all(&self) -> Vec<(&'static str, Box<P>)> {
        self.constructors.iter().map(|(name, ctor)| (*name, ctor())).collect()
    }
}

/// Registers [`PictureRenderer`] as the GPU renderer for picture sprites.
pub fn register_plugins<C>(
    registry: &mut PluginRegistry<dyn ObjectRenderer<C>>,
    config: PictureConfig,
) where
    C: GpuContext + 'static,
{
    registry.register_plugin(PICTURE_PLUGIN, move || {
        Box::new(PictureRenderer::<C>::new(config)) as Box<dyn ObjectRenderer<C>>
    });
}

/// Routes picture sprites on a non-accelerated path to the host's standard
/// sprite renderer, unmodified.
pub fn register_software_fallback<P, F>(
    registry: &mut PluginRegistry<P>,
    standard_sprite_renderer: F,
) where
    P: ?Sized,
    F: Fn() -> Box<P> + 'static,
{
    registry.register_plugin(PICTURE_PLUGIN, standard_sprite_renderer);
}
