mod encode;
mod round_trip;
