use pretty_assertions::assert_eq;
use rusty_audio::settings::roles::{Privilege, RoleIds};

use crate::common::fixtures::{DJ_ROLE, GUILD_A, GUILD_B, MEMBER, MOD_ROLE, OWNER};
use crate::common::memory_cache;

#[tokio::test]
async fn test_dj_roles_are_edited_in_place() {
    let cache = memory_cache();
    let roles = cache.dj_roles.add_guild(GUILD_A, [DJ_ROLE]).await.unwrap();
    assert_eq!(roles, RoleIds::from([DJ_ROLE.get()]));

    // Adding twice keeps one entry.
    let roles = cache.dj_roles.add_guild(GUILD_A, [DJ_ROLE]).await.unwrap();
    assert_eq!(roles.len(), 1);

    assert!(cache.dj_roles.member_is_dj(GUILD_A, &[DJ_ROLE]).await.unwrap());
    assert!(!cache.dj_roles.member_is_dj(GUILD_B, &[DJ_ROLE]).await.unwrap());

    cache.dj_roles.remove_guild(GUILD_A, [DJ_ROLE]).await.unwrap();
    assert!(cache.dj_roles.get_context_value(GUILD_A).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_privileges_follow_configured_roles() {
    let cache = memory_cache();
    let privileges = &cache.privileges;

    assert!(
        !privileges
            .get_context_value(Some(GUILD_A), MEMBER, &[MOD_ROLE], Privilege::Mod)
            .await
            .unwrap()
    );

    privileges
        .set_mod_roles(GUILD_A, Some(RoleIds::from([MOD_ROLE.get()])))
        .await
        .unwrap();
    assert!(
        privileges
            .get_context_value(Some(GUILD_A), MEMBER, &[MOD_ROLE], Privilege::Mod)
            .await
            .unwrap()
    );
    assert!(
        !privileges
            .get_context_value(Some(GUILD_A), MEMBER, &[MOD_ROLE], Privilege::Admin)
            .await
            .unwrap()
    );
    assert!(
        privileges
            .get_context_value(Some(GUILD_B), OWNER, &[], Privilege::Admin)
            .await
            .unwrap()
    );
    assert!(privileges.is_owner(OWNER));
    assert!(!privileges.is_owner(MEMBER));
}
