//! Shows the three bearer-style `Authorization` encodings applied to the same credential.

// crates.io
use color_eyre::Result;
// self
use oauth_handshake::{
	auth::{AccessCredential, BearerVersion},
	ext::{BearerSigner, RequestSignerExt},
	oauth::oauth2::http::{Request, header::AUTHORIZATION},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let credential = AccessCredential::bearer("abc123");

	for version in [BearerVersion::Standard, BearerVersion::Draft10, BearerVersion::Draft8] {
		let request = Request::builder().uri("https://api.example.com/me").body(Vec::new())?;
		let signed = BearerSigner::new(version).attach_token(request, &credential)?;
		let header = signed.headers().get(AUTHORIZATION).map(|value| value.to_str()).transpose()?;

		println!("{version}: Authorization: {}", header.unwrap_or_default());
	}

	// Configuration files name the encoding with the same labels.
	let configured: BearerVersion = "draft_10".parse()?;

	println!("Configured encoding renders `{}`.", configured.authorization_header_value("xyz"));

	Ok(())
}
