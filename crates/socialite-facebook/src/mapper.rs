//! Graph payloads to normalized entities

use socialite_core::User;
use socialite_core::entity::count;

use crate::PROVIDER_ID;
use crate::types::UserProfile;

/// Profile fields requested for users.
pub const USER_FIELDS: &str =
	"id,name,first_name,last_name,email,link,locale,location,timezone,picture.type(large),friends.limit(0)";

/// Fields every node type has, used when the node is a Page.
pub const BASIC_FIELDS: &str = "id,name,link,picture.type(large)";

pub fn profile_url(profile: &UserProfile) -> String {
	if profile.link.is_empty() {
		format!("https://www.facebook.com/{}", profile.id)
	} else {
		profile.link.clone()
	}
}

/// Renders the hour offset the Graph API reports, e.g. `-7` or `5.5`.
fn timezone(offset: Option<f32>) -> String {
	offset.map(|offset| offset.to_string()).unwrap_or_default()
}

pub fn map_user(profile: &UserProfile) -> User {
	let name = if profile.name.is_empty() {
		format!("{} {}", profile.first_name, profile.last_name)
			.trim()
			.to_string()
	} else {
		profile.name.clone()
	};

	User {
		provider: PROVIDER_ID.to_string(),
		id: profile.id.clone(),
		username: String::new(),
		name,
		email: profile.email.clone(),
		profile_url: profile_url(profile),
		avatar_url: profile.picture.data.url.clone(),
		num_posts: 0,
		num_followers: count(profile.friends.summary.total_count),
		num_following: 0,
		lang: profile.locale.clone(),
		location: profile.location.name.clone(),
		timezone: timezone(profile.timezone),
		private: false,
		last_sync_at: None,
	}
}
