use chrono::TimeDelta;

quantity!(Hours, "h");
quantity!(Minutes, "min");

impl From<Hours> for Minutes {
    fn from(hours: Hours) -> Self {
        Self(hours.0 * 60.0)
    }
}

impl From<Minutes> for Hours {
    fn from(minutes: Minutes) -> Self {
        Self(minutes.0 / 60.0)
    }
}

impl From<TimeDelta> for Minutes {
    fn from(time_delta: TimeDelta) -> Self {
        Self(time_delta.as_seconds_f64() / 60.0)
    }
}
