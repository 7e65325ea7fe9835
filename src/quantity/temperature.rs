use std::ops::Div;

use crate::quantity::time::Hours;

quantity!(Degrees, "°F");
quantity!(DegreesPerHour, "°F/h");

impl Div<DegreesPerHour> for Degrees {
    type Output = Hours;

    fn div(self, rate: DegreesPerHour) -> Self::Output {
        Hours(self.0 / rate.0)
    }
}
