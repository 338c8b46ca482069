//! Built-in rule sets, keyed by platform id.

mod chrome;
mod common;
mod image_group;

pub use chrome::NameLength;
pub use common::{DisplayMode, IconSizes, NameRequired, Orientation, StartUrlRequired};
pub use image_group::ImageGroupRule;

use crate::catalog::RuleCatalogBuilder;
use manifold_types::ValidationLevel;

const WINDOWS_APP_ICON: &[&str] = &["44x44", "62x62", "106x106"];
const WINDOWS_SMALL_TILE: &[&str] = &["71x71", "99x99", "170x170"];
const WINDOWS_SPLASH_SCREEN: &[&str] = &["620x300", "868x420", "1116x540"];
const CHROME_ICON: &[&str] = &["128x128"];
const FIREFOX_ICON: &[&str] = &["128x128"];
const ANDROID_ICON: &[&str] = &["48x48", "72x72", "96x96", "144x144", "192x192"];
const IOS_ICON: &[&str] = &["60x60", "76x76", "120x120", "152x152", "180x180"];

pub(crate) fn register_builtin(builder: RuleCatalogBuilder) -> RuleCatalogBuilder {
    let warn = ValidationLevel::Warning;
    builder
        .register(crate::COMMON_RULES, StartUrlRequired)
        .register(crate::COMMON_RULES, NameRequired)
        .register(crate::COMMON_RULES, DisplayMode)
        .register(crate::COMMON_RULES, Orientation)
        .register(crate::COMMON_RULES, IconSizes)
        .platform("web")
        .register(
            "windows10",
            ImageGroupRule::new("windows-app-icon", "An app icon", WINDOWS_APP_ICON, warn),
        )
        .register(
            "windows10",
            ImageGroupRule::new(
                "windows-small-tile",
                "A small tile logo",
                WINDOWS_SMALL_TILE,
                warn,
            ),
        )
        .register(
            "windows10",
            ImageGroupRule::new(
                "windows-splash-screen",
                "A splash screen logo",
                WINDOWS_SPLASH_SCREEN,
                warn,
            ),
        )
        .register(
            "chrome",
            ImageGroupRule::new("chrome-icon", "An app icon", CHROME_ICON, warn),
        )
        .register("chrome", NameLength)
        .register(
            "firefox",
            ImageGroupRule::new("firefox-icon", "An app icon", FIREFOX_ICON, warn),
        )
        .register(
            "android",
            ImageGroupRule::new("android-launcher-icon", "A launcher icon", ANDROID_ICON, warn),
        )
        .register(
            "ios",
            ImageGroupRule::new("ios-app-icon", "An app icon", IOS_ICON, warn),
        )
}
