// SPDX-License-Identifier: CC0-1.0

//! Parameter registry
//!
//! Holds the one parameter set a process runs with. Selection happens once
//! at startup; afterwards every caller reads the same immutable
//! [`ChainParams`] without locking.
//!

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::chain::params::ChainParams;
use crate::error::Error;
use crate::network::constants::Network;
#[cfg(any(test, feature = "test-harness"))]
use crate::consensus::params::{Deployment, DeploymentWindow, StartTime, Timeout};
#[cfg(any(test, feature = "test-harness"))]
use tracing::debug;

/// Owner of the active chain parameters.
#[derive(Debug, Default)]
pub struct ParameterRegistry {
    active: OnceCell<ChainParams>,
}

impl ParameterRegistry {
    /// A registry with no network selected yet.
    pub fn new() -> ParameterRegistry { ParameterRegistry { active: OnceCell::new() } }

    /// Selects a network by its `-chain` argument name.
    ///
    /// Unknown names leave the registry untouched.
    pub fn select_network(&self, name: &str) -> Result<&ChainParams, Error> {
        let network = name.parse::<Network>()?;
        self.select(network)
    }

    /// Builds and installs the parameters of `network`.
    ///
    /// Selecting the active network again returns the installed set.
    /// Selecting any other network once one is active fails.
    ///
    /// # Panics
    ///
    /// If the compiled-in genesis data for `network` is corrupt.
    pub fn select(&self, network: Network) -> Result<&ChainParams, Error> {
        let mut installed = false;
        let active = self.active.get_or_init(|| {
            installed = true;
            ChainParams::new(network)
        });

        if active.network() != network {
            warn!(active = %active.network(), requested = %network, "chain parameters already selected");
            return Err(Error::AlreadySelected { active: active.network(), requested: network });
        }
        if installed {
            info!(network = %network, genesis = %active.genesis_hash(), "selected chain parameters");
        }
        Ok(active)
    }

    /// The active parameters.
    ///
    /// # Panics
    ///
    /// If no network has been selected. Reading parameters before startup
    /// selection is a programming error.
    pub fn active(&self) -> &ChainParams {
        match self.active.get() {
            Some(params) => params,
            None => panic!("no chain parameters selected"),
        }
    }

    /// The active parameters, if a network has been selected.
    pub fn try_active(&self) -> Option<&ChainParams> { self.active.get() }

    /// Replaces the activation window of one deployment on the active set.
    ///
    /// Only for tests that need to move a soft fork around in time.
    ///
    /// # Panics
    ///
    /// If no network has been selected.
    #[cfg(any(test, feature = "test-harness"))]
    pub fn override_deployment_window(
        &mut self,
        deployment: Deployment,
        start: StartTime,
        timeout: Timeout,
    ) -> Result<(), Error> {
        let params = match self.active.get_mut() {
            Some(params) => params,
            None => panic!("no chain parameters selected"),
        };
        let window = params.consensus_mut().deployment_mut(deployment);
        let updated = DeploymentWindow { bit: window.bit, start, timeout };
        if !updated.is_well_formed() {
            return Err(Error::InvalidDeploymentWindow(deployment));
        }
        *window = updated;
        debug!(%deployment, ?start, ?timeout, "overrode deployment window");
        Ok(())
    }
}
