// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::types::BusCondition;

/// Share of excellent and good buses above which the fleet counts as healthy.
pub const HEALTHY_FLEET_SHARE: f64 = 0.7;

/// Number of average buses above which a scheduled inspection is advised.
pub const INSPECTION_THRESHOLD: u32 = 3;

/// Number of buses in each condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionCounts {
    pub excellent: u32,
    pub good: u32,
    pub average: u32,
    pub poor: u32,
}

impl ConditionCounts {
    /// Adds `count` buses in `condition`.
    pub const fn add(&mut self, condition: BusCondition, count: u32) {
        match condition {
            BusCondition::Excellent => self.excellent += count,
            BusCondition::Good => self.good += count,
            BusCondition::Average => self.average += count,
            BusCondition::Poor => self.poor += count,
        }
    }

    /// Total number of buses counted.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.excellent + self.good + self.average + self.poor
    }

    /// Derives maintenance recommendations from the counts.
    ///
    /// Repair is advised for every poor bus, an inspection when more than
    /// [`INSPECTION_THRESHOLD`] buses are average, and the list always ends
    /// with an overall verdict on the fleet.
    #[must_use]
    pub fn recommendations(&self) -> Vec<MaintenanceRecommendation> {
        let mut recommendations: Vec<MaintenanceRecommendation> = Vec::new();

        if self.poor > 0 {
            recommendations.push(MaintenanceRecommendation::Repair { buses: self.poor });
        }
        if self.average > INSPECTION_THRESHOLD {
            recommendations.push(MaintenanceRecommendation::Inspection {
                buses: self.average,
            });
        }

        let healthy: f64 = f64::from(self.excellent + self.good);
        if healthy > f64::from(self.total()) * HEALTHY_FLEET_SHARE {
            recommendations.push(MaintenanceRecommendation::FleetHealthy);
        } else {
            recommendations.push(MaintenanceRecommendation::FleetRenewalNeeded);
        }

        recommendations
    }
}

/// A maintenance action suggested for the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceRecommendation {
    /// Buses in poor condition need repair.
    Repair { buses: u32 },
    /// Many average buses are due a scheduled inspection.
    Inspection { buses: u32 },
    /// Most of the fleet is in excellent or good condition.
    FleetHealthy,
    /// Too few buses are in excellent or good condition.
    FleetRenewalNeeded,
}
