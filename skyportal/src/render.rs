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

//! render preparation: which aircraft get drawn where and with which icon tile. Actual drawing is
//! done by a [`Renderer`] implementation

use std::{fmt::Write as _, sync::Arc};
use uom::si::{length::foot, velocity::{knot,foot_per_minute}};
use skyportal_adsb::{AircraftFilter, AircraftState, FilterVerdict, StateSnapshot, controller::{PollState, PollStateListener}};
use skyportal_map::{GeoProjector, MapTile, Projection};
use skyportal_common::{debug, info};
use crate::hittest::HitTester;

pub const ICON_TILE_SIZE: u32 = 16;
pub const DEFAULT_ROTATION_RESOLUTION_DEG: f64 = 30.0;

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum IconSheet {
    Airplane,
    Helicopter,
}

/// a tile within an icon sheet. Sheets contain one tile per rotation step, starting at north
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct IconSprite {
    pub sheet: IconSheet,
    pub tile_index: usize,
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct IconSet {
    pub tile_size: u32,
    pub rotation_resolution_deg: f64,
}

impl Default for IconSet {
    fn default()->Self {
        IconSet { tile_size: ICON_TILE_SIZE, rotation_resolution_deg: DEFAULT_ROTATION_RESOLUTION_DEG }
    }
}

impl IconSet {
    pub fn n_tiles (&self)->usize { (360.0 / self.rotation_resolution_deg).ceil() as usize }

    /// None if the aircraft has no track
    pub fn sprite (&self, ac: &AircraftState)->Option<IconSprite> {
        let track = ac.track?;
        let sheet = if ac.category.is_rotorcraft() { IconSheet::Helicopter } else { IconSheet::Airplane };
        Some( IconSprite { sheet, tile_index: track.sector( self.rotation_resolution_deg) })
    }

    /// upper left corner of an icon centered on pixel (x,y)
    pub fn icon_origin (&self, x: i32, y: i32)->(i32,i32) {
        let offset = (self.tile_size / 2) as i32;
        (x - offset, y - offset)
    }
}

/// where an aircraft was drawn
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct RenderedPosition {
    pub icao24: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug,Clone,PartialEq)]
pub struct RenderedAircraft {
    pub position: RenderedPosition,

    /// index of the drawn record in the snapshot (ids are not guaranteed to be unique)
    pub snapshot_index: usize,

    pub sprite: IconSprite,
    pub icon_origin: (i32,i32),
}

/// the projected draw list for one snapshot
#[derive(Debug,Clone)]
pub struct RenderPlan {
    pub snapshot: Arc<StateSnapshot>,
    pub aircraft: Vec<RenderedAircraft>,

    pub n_missing_data: usize,
    pub n_on_ground: usize,
    pub n_out_of_frame: usize,
}

impl RenderPlan {
    pub fn positions (&self)->impl Iterator<Item=&RenderedPosition> {
        self.aircraft.iter().map( |ra| &ra.position)
    }

    pub fn n_skipped (&self)->usize { self.n_missing_data + self.n_on_ground + self.n_out_of_frame }

    pub fn state_of (&self, ra: &RenderedAircraft)->Option<&AircraftState> {
        self.snapshot.aircraft.get( ra.snapshot_index)
    }

    /// state of the first drawn aircraft with this id
    pub fn aircraft_state (&self, icao24: &str)->Option<&AircraftState> {
        self.aircraft.iter().find( |ra| ra.position.icao24 == icao24).and_then( |ra| self.state_of( ra))
    }

    /// the drawn aircraft closest to a touch point
    pub fn hit (&self, hit_tester: &HitTester, x: i32, y: i32)->Option<&RenderedAircraft> {
        hit_tester.nearest_index( x, y, self.positions()).and_then( |i| self.aircraft.get(i))
    }
}

pub fn project_snapshot (snapshot: Arc<StateSnapshot>, projector: &GeoProjector, filter: &AircraftFilter, icons: &IconSet)->RenderPlan {
    let mut aircraft = Vec::with_capacity( snapshot.len());
    let (mut n_missing_data, mut n_on_ground, mut n_out_of_frame) = (0, 0, 0);

    for (snapshot_index, ac) in snapshot.aircraft.iter().enumerate() {
        match filter.check( ac) {
            FilterVerdict::MissingData => { n_missing_data += 1; continue }
            FilterVerdict::OnGround => { n_on_ground += 1; continue }
            FilterVerdict::Show => {}
        }

        // plottable aircraft have position and track
        let (Some(pos), Some(sprite)) = (ac.position(), icons.sprite( ac)) else { n_missing_data += 1; continue };

        match projector.project_point( &pos) {
            Projection::Pixel{x,y} => aircraft.push( RenderedAircraft {
                position: RenderedPosition { icao24: ac.icao24.clone(), x, y },
                snapshot_index,
                sprite,
                icon_origin: icons.icon_origin( x, y),
            }),
            Projection::OutOfFrame => n_out_of_frame += 1
        }
    }

    let plan = RenderPlan { snapshot, aircraft, n_missing_data, n_on_ground, n_out_of_frame };
    info!("drawing {} aircraft, skipped {} ({} missing data, {} on ground, {} out of frame)",
          plan.aircraft.len(), plan.n_skipped(), plan.n_missing_data, plan.n_on_ground, plan.n_out_of_frame);
    plan
}

/// the text shown for a selected aircraft
pub fn aircraft_info_text (ac: &AircraftState)->String {
    let mut s = String::with_capacity(128);
    let _ = writeln!( s, "{}", ac.callsign.as_deref().unwrap_or("unknown"));
    let _ = writeln!( s, "icao24: {}", ac.icao24);

    match ac.geo_altitude.or( ac.baro_altitude) {
        Some(alt) => { let _ = writeln!( s, "alt: {:.0} ft", alt.get::<foot>()); }
        None if ac.on_ground => { let _ = writeln!( s, "alt: ground"); }
        None => { let _ = writeln!( s, "alt: ?"); }
    }
    match ac.ground_speed {
        Some(gs) => { let _ = writeln!( s, "spd: {:.0} kt", gs.get::<knot>()); }
        None => { let _ = writeln!( s, "spd: ?"); }
    }
    match ac.track {
        Some(trk) => { let _ = writeln!( s, "trk: {:.0}°", trk.degrees()); }
        None => { let _ = writeln!( s, "trk: ?"); }
    }
    if let Some(vr) = ac.vertical_rate {
        let _ = writeln!( s, "v/s: {:+.0} fpm", vr.get::<foot_per_minute>());
    }
    let _ = write!( s, "cat: {:?}", ac.category);
    s
}

/// the external rendering collaborator
pub trait Renderer {
    fn draw_background (&mut self, tile: &MapTile);
    fn draw_aircraft (&mut self, plan: &RenderPlan);
    fn set_status (&mut self, text: &str);
    fn show_aircraft_info (&mut self, ac: &AircraftState);
    fn clear_aircraft_info (&mut self);

    /// show/hide the indicator that tells the user touch input is not processed
    fn set_input_blocked (&mut self, blocked: bool);

    /// BMP encoded content of the screen, if the renderer supports it
    fn capture_screen (&mut self)->Option<Vec<u8>> { None }
}

/// turns poll state transitions into renderer input-blocked updates
pub struct InputBlockIndicator<'a> {
    renderer: &'a mut dyn Renderer,
}

impl<'a> InputBlockIndicator<'a> {
    pub fn new (renderer: &'a mut dyn Renderer)->Self { InputBlockIndicator { renderer } }
}

impl<'a> PollStateListener for InputBlockIndicator<'a> {
    fn poll_state_changed (&mut self, state: PollState) {
        self.renderer.set_input_blocked( state == PollState::PollInFlight)
    }
}

/// headless renderer that reports through the log. Screen captures are the background tile
#[derive(Default)]
pub struct LogRenderer {
    background: Option<Vec<u8>>,
    n_drawn: usize,
}

impl LogRenderer {
    pub fn new ()->Self { Self::default() }
}

impl Renderer for LogRenderer {
    fn draw_background (&mut self, tile: &MapTile) {
        info!("background {:?}", tile);
        self.background = tile.to_bmp().ok();
    }

    fn draw_aircraft (&mut self, plan: &RenderPlan) {
        self.n_drawn = plan.aircraft.len();
        for ra in &plan.aircraft {
            debug!("  {} at ({},{}) tile {:?}", ra.position.icao24, ra.position.x, ra.position.y, ra.sprite);
        }
    }

    fn set_status (&mut self, text: &str) { info!("status: {text}") }

    fn show_aircraft_info (&mut self, ac: &AircraftState) { info!("selected {ac}") }

    fn clear_aircraft_info (&mut self) { debug!("selection cleared") }

    fn set_input_blocked (&mut self, blocked: bool) { debug!("input blocked: {blocked}") }

    fn capture_screen (&mut self)->Option<Vec<u8>> { self.background.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyportal_common::{angle::{Angle360,Latitude,Longitude}, datetime::EpochMillis};
    use skyportal_adsb::AircraftCategory;
    use skyportal_map::{HardwareProfile, ProjectionFrame};

    fn aircraft (icao24: &str, callsign: &str, lat: f64, lon: f64)->AircraftState {
        let mut ac = AircraftState::new( icao24);
        ac.callsign = Some( callsign.to_string());
        ac.latitude = Some( Latitude::from_degrees( lat));
        ac.longitude = Some( Longitude::from_degrees( lon));
        ac.track = Some( Angle360::from_degrees( 90.0));
        ac
    }

    fn plan (aircraft: Vec<AircraftState>)->RenderPlan {
        let frame = ProjectionFrame::from_degrees_and_miles( 42.41, -71.17, 15.0, HardwareProfile::PyPortal).unwrap();
        let snapshot = Arc::new( StateSnapshot::new( aircraft, EpochMillis::from_secs( 1_718_049_000)));
        project_snapshot( snapshot, &GeoProjector::new( frame), &AircraftFilter::default(), &IconSet::default())
    }

    #[test]
    fn test_duplicate_ids() {
        let mut grounded = aircraft( "a835af", "FIRST", 42.41, -71.17);
        grounded.on_ground = true;
        let plan = plan( vec![ grounded, aircraft( "a835af", "SECOND", 42.41, -71.17) ]);

        assert_eq!( plan.aircraft.len(), 1);
        assert_eq!( plan.aircraft[0].snapshot_index, 1);
        assert_eq!( plan.aircraft_state("a835af").and_then( |ac| ac.callsign.as_deref()), Some("SECOND"));

        // both drawn: the one closest to the touch point is shown
        let plan = plan_of_two();
        let ra = plan.hit( &HitTester::default(), 160, 92).unwrap();
        assert_eq!( ra.snapshot_index, 1);
        assert_eq!( plan.state_of( ra).and_then( |ac| ac.callsign.as_deref()), Some("NORTH"));
        assert!( plan.hit( &HitTester::default(), 5, 230).is_none());
    }

    fn plan_of_two ()->RenderPlan {
        plan( vec![ aircraft( "a835af", "CENTER", 42.41, -71.17), aircraft( "a835af", "NORTH", 42.43, -71.17) ])
    }

    #[test]
    fn test_sprite_selection() {
        let icons = IconSet::default();
        assert_eq!( icons.n_tiles(), 12);

        let mut ac = AircraftState::new("a1b2c3");
        assert_eq!( icons.sprite( &ac), None);

        ac.track = Some( Angle360::from_degrees( 359.9));
        assert_eq!( icons.sprite( &ac), Some( IconSprite { sheet: IconSheet::Airplane, tile_index: 11 }));

        ac.track = Some( Angle360::from_degrees( 29.99));
        ac.category = AircraftCategory::Rotorcraft;
        assert_eq!( icons.sprite( &ac), Some( IconSprite { sheet: IconSheet::Helicopter, tile_index: 0 }));

        ac.track = Some( Angle360::from_degrees( 30.0));
        assert_eq!( icons.sprite( &ac).map( |s| s.tile_index), Some(1));
    }

    #[test]
    fn test_icon_origin() {
        assert_eq!( IconSet::default().icon_origin( 160, 120), (152, 112));
    }

    #[test]
    fn test_info_text() {
        let ac = AircraftState::new("a1b2c3");
        let txt = aircraft_info_text( &ac);
        assert!( txt.starts_with("unknown\nicao24: a1b2c3"));
        assert!( txt.contains("alt: ?"));
    }
}
