// Copyright 2025 folio contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The travel timeline shown beside the globe.

use serde::{Deserialize, Serialize};

/// One stop on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// City name.
    pub city: String,
    /// Short country/region code shown next to the city.
    pub country_code: String,
    /// Human-readable period, e.g. "2001 - 2013".
    pub period: String,
    /// One-line note.
    pub note: String,
    /// A speculative future stop; excluded from the visited count.
    #[serde(default)]
    pub future: bool,
}

/// The ordered timeline plus the derived visited-location codes the globe
/// caption reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journey {
    /// Stops in chronological order.
    pub stops: Vec<Stop>,
}

impl Journey {
    /// Unique codes of the places actually lived in, in first-visit order.
    ///
    /// Feeds the globe view's caption count only: never its rendering.
    pub fn visited_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for stop in self.stops.iter().filter(|s| !s.future) {
            if !codes.contains(&stop.country_code) {
                codes.push(stop.country_code.clone());
            }
        }
        codes
    }
}

impl Default for Journey {
    fn default() -> Self {
        Self {
            stops: vec![
                Stop {
                    city: "Hong Kong".to_string(),
                    country_code: "HKG".to_string(),
                    period: "2001 - 2013".to_string(),
                    note: "Born and raised".to_string(),
                    future: false,
                },
                Stop {
                    city: "Bath".to_string(),
                    country_code: "UK".to_string(),
                    period: "2013 - 2019".to_string(),
                    note: "Studied high school".to_string(),
                    future: false,
                },
                Stop {
                    city: "London".to_string(),
                    country_code: "UK".to_string(),
                    period: "2019 - Present".to_string(),
                    note: "Studied at UCL and Imperial. Working in AI".to_string(),
                    future: false,
                },
                Stop {
                    city: "Where next?".to_string(),
                    country_code: "XXX".to_string(),
                    period: "Future -".to_string(),
                    note: "Somewhere hot for work, family, and fun".to_string(),
                    future: true,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_codes_deduplicate_and_skip_future() {
        let journey = Journey::default();
        assert_eq!(journey.visited_codes(), vec!["HKG", "UK"]);
    }

    #[test]
    fn default_timeline_ends_with_a_future_stop() {
        let journey = Journey::default();
        assert_eq!(journey.stops.len(), 4);
        assert!(journey.stops.last().unwrap().future);
    }
}
