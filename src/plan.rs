use crate::models::Weekday;
use serde::{
    ser::{SerializeMap, SerializeStruct},
    Serialize, Serializer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub title: &'static str,
    pub details: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct WeekPlan {
    pub number: u8,
    pub phase: &'static str,
    pub focus: &'static str,
    days: [DayPlan; 7],
}

impl WeekPlan {
    pub fn day(&self, day: Weekday) -> &DayPlan {
        &self.days[day.index()]
    }
}

impl Serialize for WeekPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Days<'a>(&'a [DayPlan; 7]);

        impl Serialize for Days<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(7))?;
                for day in Weekday::ALL {
                    map.serialize_entry(day.name(), &self.0[day.index()])?;
                }
                map.end()
            }
        }

        let mut week = serializer.serialize_struct("WeekPlan", 4)?;
        week.serialize_field("number", &self.number)?;
        week.serialize_field("phase", &self.phase)?;
        week.serialize_field("focus", &self.focus)?;
        week.serialize_field("days", &Days(&self.days))?;
        week.end()
    }
}

pub fn weeks() -> &'static [WeekPlan] {
    &PLAN
}

pub fn find_week(number: u8) -> Option<&'static WeekPlan> {
    PLAN.iter().find(|week| week.number == number)
}

pub fn first_week() -> &'static WeekPlan {
    &PLAN[0]
}

const fn day(title: &'static str, details: &'static str) -> DayPlan {
    DayPlan { title, details }
}

const REST: DayPlan = day("Rest", "Full rest day. Easy walk or mobility work only.");

static PLAN: [WeekPlan; 12] = [
    WeekPlan {
        number: 1,
        phase: "Base",
        focus: "Aerobic foundation",
        days: [
            day("Sweet Spot", "3x10min @ 90% FTP, 5min easy between efforts."),
            day("Z2 Endurance", "60min steady @ 65-75% FTP, cadence 85-95rpm."),
            REST,
            day("Strength Climb", "3x10min @ 85% FTP at 55-65rpm, seated."),
            day("Recovery", "45-60min Z1/Z2, keep it conversational."),
            day("Long Ride", "120min+ Z2, fuel every 30min."),
            day("Long Ride", "120min+ Z2, relaxed group pace."),
        ],
    },
    WeekPlan {
        number: 2,
        phase: "Base",
        focus: "Aerobic foundation",
        days: [
            day("Sweet Spot", "3x12min @ 90% FTP, 5min easy between efforts."),
            day("Z2 Endurance", "70min steady @ 65-75% FTP."),
            REST,
            day("Strength Climb", "3x12min @ 85% FTP at 55-65rpm."),
            day("Recovery", "45-60min Z1/Z2."),
            day("Long Ride", "135min Z2 with 3x5min tempo @ 80% FTP."),
            day("Long Ride", "120min Z2."),
        ],
    },
    WeekPlan {
        number: 3,
        phase: "Base",
        focus: "Muscular endurance",
        days: [
            day("Sweet Spot", "2x20min @ 88-92% FTP, 8min easy between."),
            day("Z2 Endurance", "75min @ 65-75% FTP with 4x30s high cadence."),
            REST,
            day("Strength Climb", "4x10min @ 85% FTP at 55-65rpm."),
            day("Recovery", "45-60min Z1/Z2."),
            day("Long Ride", "150min Z2, practice climbing pacing."),
            day("Long Ride", "120min Z2."),
        ],
    },
    WeekPlan {
        number: 4,
        phase: "Base",
        focus: "Recovery week",
        days: [
            day("Openers", "45min Z2 with 3x1min @ 105% FTP."),
            day("Z2 Endurance", "60min easy @ 65% FTP."),
            REST,
            day("Z2 Endurance", "60min easy with 4x20s sprints."),
            REST,
            day("Endurance Ride", "90min Z2."),
            day("Recovery", "60min Z1."),
        ],
    },
    WeekPlan {
        number: 5,
        phase: "Build",
        focus: "Threshold development",
        days: [
            day("Threshold", "3x10min @ 95-100% FTP, 5min easy between."),
            day("Z2 Endurance", "75min @ 65-75% FTP."),
            REST,
            day("Over-Unders", "3x9min alternating 2min @ 95% / 1min @ 105% FTP."),
            day("Recovery", "45-60min Z1/Z2."),
            day("Long Ride", "150min Z2 with 2x15min @ 85% FTP."),
            day("Long Ride", "120min Z2."),
        ],
    },
    WeekPlan {
        number: 6,
        phase: "Build",
        focus: "Threshold development",
        days: [
            day("Threshold", "2x15min @ 95-100% FTP, 8min easy between."),
            day("Z2 Endurance", "80min @ 65-75% FTP."),
            REST,
            day("Strength Climb", "4x10min @ 88% FTP at 55-65rpm."),
            day("Recovery", "45-60min Z1/Z2."),
            day("Long Ride", "165min Z2 with hilly terrain."),
            day("Long Ride", "120min Z2."),
        ],
    },
    WeekPlan {
        number: 7,
        phase: "Build",
        focus: "VO2max introduction",
        days: [
            day("VO2max", "5x3min @ 110-115% FTP, 3min easy between."),
            day("Z2 Endurance", "80min @ 65-75% FTP."),
            REST,
            day("Threshold", "2x20min @ 95% FTP."),
            day("Recovery", "45-60min Z1/Z2."),
            day("Long Ride", "180min Z2 with 3x10min @ 90% FTP."),
            day("Long Ride", "120min Z2."),
        ],
    },
    WeekPlan {
        number: 8,
        phase: "Build",
        focus: "Recovery week",
        days: [
            day("Openers", "45min Z2 with 3x1min @ 110% FTP."),
            day("Z2 Endurance", "60min easy @ 65% FTP."),
            REST,
            day("Sweet Spot", "2x10min @ 88% FTP."),
            REST,
            day("Endurance Ride", "100min Z2."),
            day("Recovery", "60min Z1."),
        ],
    },
    WeekPlan {
        number: 9,
        phase: "Peak",
        focus: "Race-specific intensity",
        days: [
            day("VO2max", "6x3min @ 115% FTP, 3min easy between."),
            day("Z2 Endurance", "75min @ 65-75% FTP."),
            REST,
            day("Threshold", "3x12min @ 100% FTP."),
            day("Recovery", "45-60min Z1/Z2."),
            day("Long Ride", "180min with 4x8min @ 95% FTP on climbs."),
            day("Long Ride", "120min Z2."),
        ],
    },
    WeekPlan {
        number: 10,
        phase: "Peak",
        focus: "Race-specific intensity",
        days: [
            day("VO2max", "5x4min @ 112% FTP, 4min easy between."),
            day("Z2 Endurance", "75min @ 65-75% FTP."),
            REST,
            day("Over-Unders", "4x8min alternating 2min @ 95% / 1min @ 110% FTP."),
            day("Recovery", "45-60min Z1/Z2."),
            day("Race Simulation", "150min with 2x20min @ 95% FTP."),
            day("Long Ride", "120min Z2."),
        ],
    },
    WeekPlan {
        number: 11,
        phase: "Peak",
        focus: "Sharpening",
        days: [
            day("Anaerobic", "8x1min @ 130% FTP, 2min easy between."),
            day("Z2 Endurance", "60min @ 65-75% FTP."),
            REST,
            day("Threshold", "2x15min @ 100% FTP."),
            day("Recovery", "45min Z1."),
            day("Long Ride", "150min Z2 with race-pace surges."),
            day("Endurance Ride", "90min Z2."),
        ],
    },
    WeekPlan {
        number: 12,
        phase: "Taper",
        focus: "Freshness for the goal event",
        days: [
            day("Openers", "45min Z2 with 3x2min @ 100% FTP."),
            day("Z2 Endurance", "45min easy."),
            REST,
            day("Activation", "40min with 3x30s @ 120% FTP."),
            REST,
            day("Pre-Event Spin", "30min Z1 with 2x1min @ 100% FTP."),
            day("Goal Event", "Race or target ride. Pace by feel, fuel early."),
        ],
    },
];
