mod intersection_finder;

pub use intersection_finder::IntersectionFinder;
