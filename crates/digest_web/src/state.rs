use digest_core::{FixtureSet, PageLayout, Timeframe};

pub struct AppState {
    pub fixtures: FixtureSet,
    pub layout: PageLayout,
    pub default_timeframe: Timeframe,
    pub preference_id: Option<String>,
}

impl AppState {
    pub fn new(fixtures: FixtureSet) -> Self {
        Self {
            fixtures,
            layout: PageLayout::default(),
            default_timeframe: Timeframe::Weekly,
            preference_id: None,
        }
    }

    pub fn with_default_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.default_timeframe = timeframe;
        self
    }

    pub fn with_preference_id(mut self, preference_id: &str) -> Self {
        self.preference_id = Some(preference_id.to_string());
        self
    }
}
