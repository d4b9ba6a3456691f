//! Test fixtures

use crewvar_core::entities::CrewProfile;
use crewvar_core::value_objects::UserId;

/// A fully filled-in crew profile, extended tier included, so visibility
/// assertions have something to leak
pub fn crew_profile(id: i64, name: &str, ship: &str) -> CrewProfile {
    let mut profile = CrewProfile::new(
        UserId::new(id),
        format!("{}@crewvar.com", name.to_lowercase().replace(' ', ".")),
        name.to_string(),
    );
    profile.email_verified = true;
    profile.avatar = Some(format!("avatar-{id}"));
    profile.ship = Some(ship.to_string());
    profile.department = Some("Entertainment".to_string());
    profile.role = Some("Performer".to_string());
    profile.subcategory = Some("Stage".to_string());
    profile.bio = Some(format!("{name} has been at sea for three contracts"));
    profile.photos = vec![format!("photo-{id}-1"), format!("photo-{id}-2")];
    profile.phone = Some("+1 555 0100".to_string());
    profile.instagram = Some(format!("@{}", name.to_lowercase().replace(' ', "_")));
    profile
}
