#[macro_use]
extern crate rocket;

use adbowl_proxy::build_rocket;
use adbowl_proxy::config::{init_logger, load_environment, ProxyConfig};

#[launch]
fn rocket() -> _ {
    load_environment();
    init_logger();

    build_rocket(ProxyConfig::from_env()).expect("Proxy setup failed.")
}
