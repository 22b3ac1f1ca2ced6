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

use std::{thread, time::{Duration,Instant}};
use chrono::FixedOffset;
use skyportal_common::{net::HttpGet, info, warn};
use skyportal_adsb::{
    create_source, AircraftFilter, PollQuery,
    controller::{PollOutcome, PollStatus, StateAcquisitionController},
};
use skyportal_map::{GeoProjector, MapTile, MapTileBuilder};
use crate::{
    config::SkyPortalConfig,
    errors::Result,
    hittest::HitTester,
    render::{project_snapshot, IconSet, InputBlockIndicator, RenderPlan, Renderer},
    screenshot::{RollingArtifactStore, ScreenshotRecord},
    status::status_text,
    touch::{DebouncedTouch, TouchSource},
};

/// edge length of the screenshot touch area in the top right corner
pub const SCREENSHOT_BUTTON_SIZE: i32 = 32;

#[derive(Debug,Clone,PartialEq)]
pub enum TouchAction {
    Selected(String),
    Cleared,
    Screenshot(ScreenshotRecord),
    ScreenshotFailed,
}

/// the device application: owns the controller, the projection and the last render plan
pub struct SkyPortal<R,T> where R: Renderer, T: TouchSource {
    projector: GeoProjector,
    map_tile: MapTile,
    controller: StateAcquisitionController,
    filter: AircraftFilter,
    icons: IconSet,
    hit_tester: HitTester,
    utc_offset: Option<FixedOffset>,
    screenshots: Option<RollingArtifactStore>,

    renderer: R,
    touch: DebouncedTouch<T>,

    plan: Option<RenderPlan>,
    selected: Option<String>,
}

impl<R,T> SkyPortal<R,T> where R: Renderer, T: TouchSource {

    /// build projection, background tile and data source. This blocks while the map tile is fetched
    pub fn new<C> (config: &SkyPortalConfig, client: C, mut renderer: R, touch: T)->Result<Self> where C: HttpGet + Clone + 'static {
        let frame = config.projection_frame()?;
        info!("display grid {frame}, source {}", config.source);

        let builder = MapTileBuilder::new( client.clone(), config.map.provider.clone(), config.hardware);
        if !config.map.use_default_map { renderer.set_input_blocked( true) }
        let map_tile = builder.build( &frame, config.map.use_default_map);
        if !config.map.use_default_map { renderer.set_input_blocked( false) }
        renderer.draw_background( &map_tile);

        let source = create_source( &config.source, client);
        let query = PollQuery::new( *frame.center(), frame.half_diagonal());
        let controller = StateAcquisitionController::new( source, query, config.refresh_interval);

        let screenshots = if config.screenshots.button {
            Some( RollingArtifactStore::open( &config.screenshots.dir, config.screenshots.max_retained)?)
        } else {
            None
        };

        renderer.set_status( &format!("waiting for {}", config.source.selector()));

        Ok( SkyPortal {
            projector: GeoProjector::new( frame),
            map_tile,
            controller,
            filter: AircraftFilter::from( &config.filter),
            icons: IconSet::default(),
            hit_tester: HitTester::new( config.touch_threshold_px),
            utc_offset: config.utc_offset(),
            screenshots,
            renderer,
            touch: DebouncedTouch::new( touch),
            plan: None,
            selected: None,
        })
    }

    pub fn projector (&self)->&GeoProjector { &self.projector }
    pub fn map_tile (&self)->&MapTile { &self.map_tile }
    pub fn controller (&self)->&StateAcquisitionController { &self.controller }
    pub fn poll_status (&self)->PollStatus { self.controller.status_handle() }
    pub fn plan (&self)->Option<&RenderPlan> { self.plan.as_ref() }
    pub fn selected (&self)->Option<&str> { self.selected.as_deref() }
    pub fn renderer (&self)->&R { &self.renderer }
    pub fn screenshots (&self)->Option<&RollingArtifactStore> { self.screenshots.as_ref() }

    /// one loop iteration: poll if due, then process pending touch input
    pub fn step (&mut self, now: Instant)->(Option<PollOutcome>, Option<TouchAction>) {
        let outcome = if self.controller.is_poll_due( now) { Some( self.poll()) } else { None };
        let action = self.process_touch();
        (outcome, action)
    }

    /// blocking poll with input-blocked indication, followed by redraw and status update
    pub fn poll (&mut self)->PollOutcome {
        let outcome = {
            let mut indicator = InputBlockIndicator::new( &mut self.renderer);
            self.controller.poll( &mut indicator)
        };

        if outcome.is_success() {
            if let Some(snapshot) = self.controller.snapshot() {
                let plan = project_snapshot( snapshot, &self.projector, &self.filter, &self.icons);
                self.renderer.draw_aircraft( &plan);
                self.plan = Some( plan);
                self.refresh_selection();
            }
        }

        let snapshot = self.controller.snapshot();
        let status = status_text( self.controller.acquisition_status(), snapshot.as_deref(), self.utc_offset);
        self.renderer.set_status( &status);

        outcome
    }

    // the selected aircraft might have been updated or vanished
    fn refresh_selection (&mut self) {
        let Some(icao24) = self.selected.clone() else { return };

        match self.plan.as_ref().and_then( |plan| plan.aircraft_state( &icao24)) {
            Some(ac) => self.renderer.show_aircraft_info( ac),
            None => {
                self.selected = None;
                self.renderer.clear_aircraft_info();
            }
        }
    }

    pub fn process_touch (&mut self)->Option<TouchAction> {
        let (x,y) = self.touch.touch_point()?;

        if self.screenshots.is_some() && self.is_screenshot_button( x, y) {
            return Some( self.take_screenshot())
        }

        let hit = self.plan.as_ref()
            .and_then( |plan| plan.hit( &self.hit_tester, x, y).map( |ra| (plan, ra)));

        match hit {
            Some((plan, ra)) => {
                let icao24 = ra.position.icao24.clone();
                if let Some(ac) = plan.state_of( ra) {
                    info!("touch ({x},{y}) selected {icao24}");
                    self.renderer.show_aircraft_info( ac);
                }
                self.selected = Some( icao24.clone());
                Some( TouchAction::Selected( icao24))
            }
            None => {
                self.selected = None;
                self.renderer.clear_aircraft_info();
                Some( TouchAction::Cleared)
            }
        }
    }

    fn is_screenshot_button (&self, x: i32, y: i32)->bool {
        let w = self.projector.frame().width_px() as i32;
        x >= w - SCREENSHOT_BUTTON_SIZE && x < w && y >= 0 && y < SCREENSHOT_BUTTON_SIZE
    }

    fn take_screenshot (&mut self)->TouchAction {
        let Some(store) = self.screenshots.as_mut() else { return TouchAction::ScreenshotFailed };
        let Some(bmp) = self.renderer.capture_screen() else {
            warn!("renderer does not support screen captures");
            return TouchAction::ScreenshotFailed
        };

        match store.add( &bmp) {
            Ok(record) => TouchAction::Screenshot( record),
            Err(e) => {
                warn!("screenshot not saved: {e}");
                TouchAction::ScreenshotFailed
            }
        }
    }

    /// run the main loop, sleeping `tick` between iterations. Runs forever if `max_iterations` is None
    pub fn run (&mut self, tick: Duration, max_iterations: Option<u64>) {
        let mut n = 0;
        while max_iterations.is_none_or( |max| n < max) {
            self.step( Instant::now());
            thread::sleep( tick);
            n += 1;
        }
    }
}
