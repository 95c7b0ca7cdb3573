pub mod youtube;

pub use youtube::*;

use rocket::Route;

pub fn routes() -> Vec<Route> {
    rocket::routes![
        video_stats,
        video_stats_preflight,
        video_stats_post,
        video_stats_put,
        video_stats_patch,
        video_stats_delete,
    ]
}
