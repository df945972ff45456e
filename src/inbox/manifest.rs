//! Web app manifest scoped to a single inbox URL.

// self
use crate::{_prelude::*, http::ProviderHttpClient, inbox::Inbox, obs::InboxOp};

const APP_NAME: &str = "PWA Inbox";
const APP_DESCRIPTION: &str = "PWA Inbox - a Progressive Web Application powered by MagicBell";
const IOS_ICON_SIZES: &[u16] = &[16, 32, 72, 96, 128, 144, 152, 180, 192, 256, 512, 1024];
const ANDROID_ICON_SIZES: &[u16] = &[48, 72, 96, 144, 192, 512];

/// Installable web app manifest whose start URL and scope are the inbox URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WebManifest {
	/// Full application name.
	pub name: &'static str,
	/// Launcher name.
	pub short_name: &'static str,
	/// Store-style description.
	pub description: &'static str,
	/// Path opened when the installed app launches.
	pub start_url: String,
	/// Navigation scope of the installed app.
	pub scope: String,
	/// Display mode.
	pub display: &'static str,
	/// Toolbar color.
	pub theme_color: &'static str,
	/// Splash background color.
	pub background_color: &'static str,
	/// Preferred orientation.
	pub orientation: &'static str,
	/// Launcher icons.
	pub icons: Vec<ManifestIcon>,
}

/// One icon entry of a [`WebManifest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ManifestIcon {
	/// Icon path.
	pub src: String,
	/// `WxH` size descriptor.
	pub sizes: String,
	/// MIME type.
	#[serde(rename = "type")]
	pub kind: &'static str,
}

impl<C> Inbox<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Verifies a read token and returns the manifest scoped to its inbox.
	pub fn manifest(&self, token: &str) -> Result<WebManifest> {
		self.observe(InboxOp::Manifest, || {
			let read = self.verify_read(InboxOp::Manifest, token)?;
			let path = format!("/{read}");

			Ok(WebManifest {
				name: APP_NAME,
				short_name: APP_NAME,
				description: APP_DESCRIPTION,
				start_url: path.clone(),
				scope: path,
				display: "standalone",
				theme_color: "#6E56CF",
				background_color: "#23283b",
				orientation: "portrait-primary",
				icons: icons(),
			})
		})
	}
}

fn icons() -> Vec<ManifestIcon> {
	let ios = IOS_ICON_SIZES.iter().map(|size| icon(format!("/icons/ios/{size}.png"), *size));
	let android = ANDROID_ICON_SIZES.iter().map(|size| {
		icon(format!("/icons/android/android-launchericon-{size}-{size}.png"), *size)
	});

	ios.chain(android).collect()
}

fn icon(src: String, size: u16) -> ManifestIcon {
	ManifestIcon { src, sizes: format!("{size}x{size}"), kind: "image/png" }
}
