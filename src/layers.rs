use serde::Serialize;

use crate::constants::{
    MAP_BOUNDS_VISCOSITY, MAP_CENTER, MAP_MIN_ZOOM, MAP_OUTER_BOUNDS, MAP_ZOOM, MARKER_COLOR,
    MARKER_FILL_OPACITY, MARKER_WEIGHT, OVERLAY_NAME,
};

/// A selectable background tile layer.
#[derive(Debug, Clone, Serialize)]
pub struct BaseLayer {
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
    pub checked: bool,
}

pub const BASE_LAYERS: &[BaseLayer] = &[
    BaseLayer {
        name: "OpenStreetMap",
        url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
        checked: true,
    },
    BaseLayer {
        name: "OpenTopoMap",
        url: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        attribution: "Map data: &copy; OpenStreetMap contributors, SRTM | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (CC-BY-SA)",
        checked: false,
    },
    BaseLayer {
        name: "Esri World Imagery",
        url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community",
        checked: false,
    },
    BaseLayer {
        name: "CARTO Dark Matter",
        url: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        attribution: "&copy; OpenStreetMap contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>",
        checked: false,
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    #[serde(rename = "fillColor")]
    pub fill_color: &'static str,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
    pub weight: u32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: MARKER_COLOR,
            fill_color: MARKER_COLOR,
            fill_opacity: MARKER_FILL_OPACITY,
            weight: MARKER_WEIGHT,
        }
    }
}

/// Initial view and navigation limits of the map.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_bounds: [[f64; 2]; 2],
    pub max_bounds_viscosity: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            min_zoom: MAP_MIN_ZOOM,
            max_bounds: MAP_OUTER_BOUNDS,
            max_bounds_viscosity: MAP_BOUNDS_VISCOSITY,
        }
    }
}

/// Everything the page needs to build the Leaflet map and its layers control.
#[derive(Debug, Clone, Serialize)]
pub struct MapComposition {
    pub view: MapView,
    pub base_layers: &'static [BaseLayer],
    pub overlay_name: &'static str,
    pub overlay_checked: bool,
    pub marker_style: MarkerStyle,
}

impl Default for MapComposition {
    fn default() -> Self {
        Self {
            view: MapView::default(),
            base_layers: BASE_LAYERS,
            overlay_name: OVERLAY_NAME,
            overlay_checked: true,
            marker_style: MarkerStyle::default(),
        }
    }
}
