//! Canned route planner
//!
//! No real routing happens here; any origin/destination pair gets the same
//! fastest/safest pair of canned routes after an artificial delay.

use serde::{Deserialize, Serialize};

/// Request for a route plan
#[derive(Debug, Clone, Deserialize)]
pub struct RoutePlanRequest {
    pub origin: String,
    pub destination: String,
}

/// The fastest of the canned routes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FastestRoute {
    pub duration: String,
    pub distance: String,
    pub traffic: String,
    pub route: String,
}

/// The safest of the canned routes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafestRoute {
    pub duration: String,
    pub distance: String,
    pub safety_score: u32,
    pub route: String,
    pub features: Vec<String>,
}

/// A route plan, always one fastest and one safest option
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub fastest: FastestRoute,
    pub safest: SafestRoute,
}

/// The canned plan returned for every request
pub fn canned_plan() -> RoutePlan {
    RoutePlan {
        fastest: FastestRoute {
            duration: "4h 32m".to_string(),
            distance: "287 km".to_string(),
            traffic: "Moderate".to_string(),
            route: "NH44 → State Highway 15 → City Ring Road".to_string(),
        },
        safest: SafestRoute {
            duration: "5h 15m".to_string(),
            distance: "312 km".to_string(),
            safety_score: 92,
            route: "Express Highway → Bypass Route → Local Roads".to_string(),
            features: vec![
                "Well-lit roads".to_string(),
                "Police checkpoints".to_string(),
                "Rest stops".to_string(),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_always_has_both_options() {
        let plan = canned_plan();
        assert_eq!(plan.fastest.duration, "4h 32m");
        assert_eq!(plan.safest.safety_score, 92);
        assert_eq!(plan.safest.features.len(), 3);
    }

    #[test]
    fn plan_is_stable_across_calls() {
        assert_eq!(canned_plan(), canned_plan());
    }
}
