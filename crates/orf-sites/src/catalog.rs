//! Cached interferometer sites.

use std::fmt::{self, Display};
use std::str::FromStr;

use orf_core::{Detector, ErrorInfo, OrfError};
use serde::{Deserialize, Serialize};

use crate::geodetic::{detector_from_frame, FrameDetector};

/// Ground-based interferometers with cached site frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Site {
    /// LIGO Hanford 4 km.
    Lho4k,
    /// LIGO Livingston 4 km.
    Llo4k,
    /// Virgo 3 km.
    Virgo,
    /// GEO600.
    Geo600,
    /// TAMA300.
    Tama300,
}

struct SiteRecord {
    name: &'static str,
    prefix: &'static str,
    longitude: f64,
    latitude: f64,
    elevation: f64,
    x_azimuth: f64,
    x_altitude: f64,
    y_azimuth: f64,
    y_altitude: f64,
}

const LHO_4K: SiteRecord = SiteRecord {
    name: "LHO_4k",
    prefix: "H1",
    longitude: -2.084_056_769_17,
    latitude: 0.810_795_263_83,
    elevation: 142.554,
    x_azimuth: 5.654_877_248_44,
    x_altitude: -0.000_619_5,
    y_azimuth: 4.084_080_921_64,
    y_altitude: 0.000_012_5,
};

const LLO_4K: SiteRecord = SiteRecord {
    name: "LLO_4k",
    prefix: "L1",
    longitude: -1.584_309_370_78,
    latitude: 0.533_423_135_06,
    elevation: -6.574,
    x_azimuth: 4.403_177_723_46,
    x_altitude: -0.000_312_1,
    y_azimuth: 2.832_381_396_66,
    y_altitude: -0.000_610_7,
};

const VIRGO: SiteRecord = SiteRecord {
    name: "VIRGO",
    prefix: "V1",
    longitude: 0.183_338_052_13,
    latitude: 0.761_511_839_84,
    elevation: 51.884,
    x_azimuth: 0.339_162_852_22,
    x_altitude: 0.0,
    y_azimuth: 5.051_552_832_61,
    y_altitude: 0.0,
};

const GEO_600: SiteRecord = SiteRecord {
    name: "GEO_600",
    prefix: "G1",
    longitude: 0.171_167_804_35,
    latitude: 0.911_849_827_52,
    elevation: 114.425,
    x_azimuth: 1.193_601_004_84,
    x_altitude: 0.0,
    y_azimuth: 5.830_392_794_01,
    y_altitude: 0.0,
};

const TAMA_300: SiteRecord = SiteRecord {
    name: "TAMA_300",
    prefix: "T1",
    longitude: 2.435_363_594_69,
    latitude: 0.622_673_360_22,
    elevation: 90.0,
    x_azimuth: 4.712_388_980_38,
    x_altitude: 0.0,
    y_azimuth: 3.141_592_653_59,
    y_altitude: 0.0,
};

impl Site {
    /// Every cached site, ordered by catalogue index.
    pub const ALL: [Site; 5] = [
        Site::Lho4k,
        Site::Llo4k,
        Site::Virgo,
        Site::Geo600,
        Site::Tama300,
    ];

    /// Looks up a site by its catalogue index.
    pub fn from_index(index: usize) -> Result<Self, OrfError> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            OrfError::InvalidReference(
                ErrorInfo::new("unknown-site-index", "no cached site at this index")
                    .with_context("index", index.to_string())
                    .with_context("available", Self::ALL.len().to_string()),
            )
        })
    }

    /// Catalogue index of the site.
    pub fn index(self) -> usize {
        self as usize
    }

    fn record(self) -> &'static SiteRecord {
        match self {
            Site::Lho4k => &LHO_4K,
            Site::Llo4k => &LLO_4K,
            Site::Virgo => &VIRGO,
            Site::Geo600 => &GEO_600,
            Site::Tama300 => &TAMA_300,
        }
    }

    /// Site name, e.g. `LHO_4k`.
    pub fn name(self) -> &'static str {
        self.record().name
    }

    /// Channel prefix, e.g. `H1`.
    pub fn prefix(self) -> &'static str {
        self.record().prefix
    }

    /// Geodetic frame of the site.
    pub fn frame(self) -> FrameDetector {
        let r = self.record();
        FrameDetector {
            name: r.name.to_string(),
            prefix: r.prefix.to_string(),
            vertex_longitude: r.longitude,
            vertex_latitude: r.latitude,
            vertex_elevation: r.elevation,
            x_arm_azimuth: r.x_azimuth,
            x_arm_altitude: r.x_altitude,
            y_arm_azimuth: r.y_azimuth,
            y_arm_altitude: r.y_altitude,
        }
    }

    /// Earth-fixed detector geometry of the site.
    pub fn detector(self) -> Detector {
        log::debug!("building detector for cached site {}", self.name());
        detector_from_frame(&self.frame())
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Site {
    type Err = OrfError;

    /// Accepts the channel prefix, the site name or the catalogue index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Ok(index) = key.parse::<usize>() {
            return Self::from_index(index);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|site| {
                key.eq_ignore_ascii_case(site.prefix()) || key.eq_ignore_ascii_case(site.name())
            })
            .ok_or_else(|| {
                OrfError::InvalidReference(
                    ErrorInfo::new("unknown-site", "no cached site matches this name")
                        .with_context("site", key)
                        .with_hint("use one of H1, L1, V1, G1, T1"),
                )
            })
    }
}
