//! Sector and area definitions
//!
//! The operating floor is split into three areas. Sortic and Transfer each
//! own a handover position and a gateway; the Transit area connects both
//! gateways and holds the parking position.
//!
//! ```text
//! Sortic                     Transit                         Transfer
//! Handover -> WaitForGateway -> Gateway -> TransitTo* -> Gateway <- WaitForGateway <- Handover
//! ```

use core::fmt;
use core::str::FromStr;

/// Named physical zone of the operating topology
///
/// `Error` is the sentinel produced when decoding an unknown sector name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sector {
    /// Sortic - Handover
    SorticHandover,
    /// Sortic - to Handover
    SorticToHandover,
    /// Sortic - Wait for Gateway
    SorticWaitForGateway,
    /// Sortic - Gateway
    SorticGateway,
    /// Transit - Wait for Gateway Sortic
    TransitWaitForGatewaySortic,
    /// Transit - to Sortic
    TransitToSortic,
    /// Transit - to Transfer
    TransitToTransfer,
    /// Parking (not part of any path yet)
    Parking,
    /// Transit - Wait for Gateway Transfer
    TransitWaitForGatewayTransfer,
    /// Transfer - Gateway
    TransferGateway,
    /// Transfer - Wait for Gateway
    TransferWaitForGateway,
    /// Transfer - to Handover
    TransferToHandover,
    /// Transfer - Handover
    TransferHandover,
    /// Unknown sector
    Error,
}

impl Sector {
    /// All valid sectors (excludes the `Error` sentinel)
    pub const ALL: [Sector; 13] = [
        Sector::SorticHandover,
        Sector::SorticToHandover,
        Sector::SorticWaitForGateway,
        Sector::SorticGateway,
        Sector::TransitWaitForGatewaySortic,
        Sector::TransitToSortic,
        Sector::TransitToTransfer,
        Sector::Parking,
        Sector::TransitWaitForGatewayTransfer,
        Sector::TransferGateway,
        Sector::TransferWaitForGateway,
        Sector::TransferToHandover,
        Sector::TransferHandover,
    ];

    /// Canonical name of the sector
    pub const fn name(self) -> &'static str {
        match self {
            Sector::SorticHandover => "SorticHandover",
            Sector::SorticToHandover => "SorticToHandover",
            Sector::SorticWaitForGateway => "SorticWaitForGateway",
            Sector::SorticGateway => "SorticGateway",
            Sector::TransitWaitForGatewaySortic => "TransitWaitForGatewaySortic",
            Sector::TransitToSortic => "TransitToSortic",
            Sector::TransitToTransfer => "TransitToTransfer",
            Sector::Parking => "Parking",
            Sector::TransitWaitForGatewayTransfer => "TransitWaitForGatewayTransfer",
            Sector::TransferGateway => "TransferGateway",
            Sector::TransferWaitForGateway => "TransferWaitForGateway",
            Sector::TransferToHandover => "TransferToHandover",
            Sector::TransferHandover => "TransferHandover",
            Sector::Error => "error",
        }
    }

    /// Look up a sector by its canonical name
    ///
    /// Returns `None` for unknown names. The `"error"` name is not a valid
    /// sector and also yields `None`.
    pub fn from_name(name: &str) -> Option<Sector> {
        Sector::ALL.into_iter().find(|sector| sector.name() == name)
    }

    /// Area the sector belongs to (`None` for `Error`)
    pub const fn area(self) -> Option<Area> {
        match self {
            Sector::SorticHandover
            | Sector::SorticToHandover
            | Sector::SorticWaitForGateway
            | Sector::SorticGateway => Some(Area::Sortic),
            Sector::TransitWaitForGatewaySortic
            | Sector::TransitToSortic
            | Sector::TransitToTransfer
            | Sector::Parking
            | Sector::TransitWaitForGatewayTransfer => Some(Area::Transit),
            Sector::TransferGateway
            | Sector::TransferWaitForGateway
            | Sector::TransferToHandover
            | Sector::TransferHandover => Some(Area::Transfer),
            Sector::Error => None,
        }
    }

    /// Check if this is a real sector (not the `Error` sentinel)
    pub const fn is_valid(self) -> bool {
        !matches!(self, Sector::Error)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown sector name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSector;

impl fmt::Display for UnknownSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sector name")
    }
}

impl FromStr for Sector {
    type Err = UnknownSector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sector::from_name(s).ok_or(UnknownSector)
    }
}

/// Logical area grouping sectors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Area {
    /// Sortic side (handover and gateway)
    Sortic,
    /// Transit lanes between the gateways
    Transit,
    /// Transfer side (handover and gateway)
    Transfer,
}

impl Area {
    /// Area name for diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Area::Sortic => "Sortic",
            Area::Transit => "Transit",
            Area::Transfer => "Transfer",
        }
    }

    /// Sector where a vehicle of this area queues for the gateway
    ///
    /// Transit has a waiting position in front of each gateway, so the
    /// travel direction picks one.
    pub const fn waiting_sector(self, toward: Area) -> Sector {
        match (self, toward) {
            (Area::Sortic, _) => Sector::SorticWaitForGateway,
            (Area::Transfer, _) => Sector::TransferWaitForGateway,
            (Area::Transit, Area::Sortic) => Sector::TransitWaitForGatewaySortic,
            (Area::Transit, _) => Sector::TransitWaitForGatewayTransfer,
        }
    }

    /// Gateway sector crossed when leaving this area toward `toward`
    pub const fn gateway_sector(self, toward: Area) -> Sector {
        match (self, toward) {
            (Area::Sortic, _) => Sector::SorticGateway,
            (Area::Transfer, _) => Sector::TransferGateway,
            (Area::Transit, Area::Sortic) => Sector::SorticGateway,
            (Area::Transit, _) => Sector::TransferGateway,
        }
    }

    /// Sector in front of the area's end point
    pub const fn approach_sector(self) -> Sector {
        match self {
            Area::Sortic => Sector::SorticToHandover,
            Area::Transit => Sector::Parking,
            Area::Transfer => Sector::TransferToHandover,
        }
    }

    /// Transit lane leading toward this area
    pub const fn transit_lane(self) -> Sector {
        match self {
            Area::Sortic => Sector::TransitToSortic,
            _ => Sector::TransitToTransfer,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
