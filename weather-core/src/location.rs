//! Saved-location registry.
//!
//! Every change to the location list goes through [`LocationRegistry`] so the
//! one-location-per-name rule is enforced in a single place. Mutations are
//! persisted immediately through the [`ConfigStore`].

use tracing::{debug, instrument};

use crate::{
    config::{ConfigStore, Configuration, Location},
    error::{Result, WeatherError},
};

#[derive(Debug)]
pub struct LocationRegistry<'a> {
    config: &'a mut Configuration,
    store: &'a ConfigStore,
}

impl<'a> LocationRegistry<'a> {
    pub fn new(config: &'a mut Configuration, store: &'a ConfigStore) -> Self {
        Self { config, store }
    }

    /// Append a new location. Coordinates are stored as given.
    #[instrument(skip(self))]
    pub fn add(&mut self, name: &str, latitude: f64, longitude: f64) -> Result<()> {
        if self.config.find_location(name).is_some() {
            return Err(WeatherError::DuplicateLocation(name.to_string()));
        }

        self.store.mutate(self.config, |cfg| {
            cfg.locations.push(Location::new(name, latitude, longitude));
            Ok(())
        })?;

        debug!(total = self.config.locations.len(), "location added");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let index = self.position(name)?;

        self.store.mutate(self.config, |cfg| {
            cfg.locations.remove(index);
            Ok(())
        })?;

        debug!(total = self.config.locations.len(), "location removed");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Location> {
        self.config
            .find_location(name)
            .cloned()
            .ok_or_else(|| WeatherError::LocationNotFound(name.to_string()))
    }

    /// Saved locations in insertion order.
    pub fn list(&self) -> &[Location] {
        &self.config.locations
    }

    /// Move an existing location, keeping its name and position.
    #[instrument(skip(self))]
    pub fn update(&mut self, name: &str, latitude: f64, longitude: f64) -> Result<()> {
        let index = self.position(name)?;

        self.store.mutate(self.config, |cfg| {
            let loc = &mut cfg.locations[index];
            loc.latitude = latitude;
            loc.longitude = longitude;
            Ok(())
        })
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.config
            .locations
            .iter()
            .position(|loc| loc.name == name)
            .ok_or_else(|| WeatherError::LocationNotFound(name.to_string()))
    }
}
