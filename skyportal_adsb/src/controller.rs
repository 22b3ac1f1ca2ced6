/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::{cell::Cell, rc::Rc, sync::Arc, time::{Duration,Instant}};
use skyportal_common::{info, warn};
use crate::{AircraftStateSource, PollQuery, StateSnapshot, errors::SourceError};

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum PollState {
    Idle,
    PollInFlight,
}

/// read-only view of the controller's poll state that can be handed to the input layer. Polls
/// run on the device loop thread, hence the handle is not `Send`
#[derive(Debug,Clone,Default)]
pub struct PollStatus {
    in_flight: Rc<Cell<bool>>,
}

impl PollStatus {
    pub fn state (&self)->PollState {
        if self.in_flight.get() { PollState::PollInFlight } else { PollState::Idle }
    }

    /// touch input is not processed while a poll blocks the device
    pub fn accepts_input (&self)->bool { self.state() == PollState::Idle }

    fn set (&self, state: PollState) {
        self.in_flight.set( state == PollState::PollInFlight)
    }
}

/// gets notified synchronously on each state transition, i.e. before the blocking request is
/// issued and after it returned. This is where the UI shows/clears its "input blocked" indicator
pub trait PollStateListener {
    fn poll_state_changed (&mut self, state: PollState);
}

/// listener for callers that only watch the [`PollStatus`]
pub struct NoListener;

impl PollStateListener for NoListener {
    fn poll_state_changed (&mut self, _state: PollState) {}
}

#[derive(Debug,Clone,PartialEq)]
pub enum PollOutcome {
    Updated { n_aircraft: usize },

    /// the previous snapshot (if any) is retained. `has_stale_data` tells if there is one
    Failed { error: SourceError, has_stale_data: bool },
}

impl PollOutcome {
    pub fn is_success (&self)->bool { matches!( self, PollOutcome::Updated{..}) }
}

/// what the rendering layer should tell the user about the data it draws
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum AcquisitionStatus {
    NoData,
    Current,
    Stale,
    Misconfigured,
}

/// owns the polling cadence and the current snapshot. Failed polls never discard a snapshot
pub struct StateAcquisitionController {
    source: Box<dyn AircraftStateSource>,
    query: PollQuery,
    refresh_interval: Duration,

    status: PollStatus,
    snapshot: Option<Arc<StateSnapshot>>,
    last_failure: Option<SourceError>,
    last_poll: Option<Instant>,

    n_polls: u64,
    n_failures: u64,
}

impl StateAcquisitionController {
    pub fn new (source: Box<dyn AircraftStateSource>, query: PollQuery, refresh_interval: Duration)->Self {
        StateAcquisitionController {
            source,
            query,
            refresh_interval,
            status: PollStatus::default(),
            snapshot: None,
            last_failure: None,
            last_poll: None,
            n_polls: 0,
            n_failures: 0,
        }
    }

    pub fn source_name (&self)->&'static str { self.source.name() }
    pub fn query (&self)->&PollQuery { &self.query }
    pub fn refresh_interval (&self)->Duration { self.refresh_interval }

    pub fn status_handle (&self)->PollStatus { self.status.clone() }
    pub fn poll_state (&self)->PollState { self.status.state() }

    /// the last successfully acquired snapshot, which might be stale (see [`Self::acquisition_status`])
    pub fn snapshot (&self)->Option<Arc<StateSnapshot>> { self.snapshot.clone() }

    pub fn last_failure (&self)->Option<&SourceError> { self.last_failure.as_ref() }

    pub fn n_polls (&self)->u64 { self.n_polls }
    pub fn n_failures (&self)->u64 { self.n_failures }

    pub fn acquisition_status (&self)->AcquisitionStatus {
        match (&self.last_failure, &self.snapshot) {
            (Some(e), _) if e.is_config_problem() => AcquisitionStatus::Misconfigured,
            (Some(_), Some(_)) => AcquisitionStatus::Stale,
            (None, Some(_)) => AcquisitionStatus::Current,
            (_, None) => AcquisitionStatus::NoData,
        }
    }

    pub fn is_poll_due (&self, now: Instant)->bool {
        match self.last_poll {
            Some(last) => now.saturating_duration_since( last) >= self.refresh_interval,
            None => true
        }
    }

    pub fn poll_if_due (&mut self, now: Instant, listener: &mut dyn PollStateListener)->Option<PollOutcome> {
        if self.is_poll_due( now) { Some( self.poll( listener)) } else { None }
    }

    /// one blocking Idle -> PollInFlight -> Idle cycle, regardless of the outcome
    pub fn poll (&mut self, listener: &mut dyn PollStateListener)->PollOutcome {
        self.last_poll = Some( Instant::now());
        self.n_polls += 1;

        self.status.set( PollState::PollInFlight);
        listener.poll_state_changed( PollState::PollInFlight);

        info!("polling {} for aircraft within {:.1} mi of {}", self.source.name(), self.query.radius_mi(), self.query.center);
        let result = self.source.poll( &self.query);

        self.status.set( PollState::Idle);
        listener.poll_state_changed( PollState::Idle);

        match result {
            Ok(snapshot) => {
                let n_aircraft = snapshot.len();
                info!("received {} aircraft from {}", n_aircraft, self.source.name());
                self.snapshot = Some( Arc::new( snapshot));
                self.last_failure = None;
                PollOutcome::Updated { n_aircraft }
            }
            Err(error) => {
                self.n_failures += 1;
                let has_stale_data = self.snapshot.is_some();
                if error.is_config_problem() {
                    warn!("{} configuration problem: {}", self.source.name(), error);
                } else {
                    warn!("{} poll failed (keeping stale data: {}): {}", self.source.name(), has_stale_data, error);
                }
                self.last_failure = Some( error.clone());
                PollOutcome::Failed { error, has_stale_data }
            }
        }
    }
}
