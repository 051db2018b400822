//! Access control evaluator.
//!
//! Pure predicates over (acting user, operation, optional target).
//! Every function returns a plain allow/deny; callers translate a deny
//! into [`crate::errors::AppError::Forbidden`] before touching the store.

use super::professional::Professional;
use super::user::{AccessLevel, User};

/// Visibility scope applied to city-bound listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// No city restriction (global admins)
    All,
    /// Restricted to the given city. `City(None)` matches nothing:
    /// a sub-admin without an assigned city sees no city-scoped rows.
    City(Option<i32>),
}

/// City and equipment catalog writes require a city admin or better.
pub fn can_manage_catalog(actor: &User) -> bool {
    actor.access_level >= AccessLevel::CityAdmin
}

/// User management (list/create/update/delete) requires a city admin or better.
pub fn can_manage_users(actor: &User) -> bool {
    actor.access_level >= AccessLevel::CityAdmin
}

/// Audit log and audit statistics reads require a city admin or better.
pub fn can_view_audit(actor: &User) -> bool {
    actor.access_level >= AccessLevel::CityAdmin
}

/// Report generation (PDF, spreadsheet, statistics) requires an editor or better.
pub fn can_export(actor: &User) -> bool {
    actor.access_level >= AccessLevel::Editor
}

/// Scope applied to professional listings, reports and statistics.
pub fn professional_scope(actor: &User) -> ListScope {
    if actor.access_level == AccessLevel::GlobalAdmin {
        ListScope::All
    } else {
        ListScope::City(actor.city_id)
    }
}

/// Scope applied to user listings: city admins only see their own city.
pub fn user_scope(actor: &User) -> ListScope {
    if actor.access_level == AccessLevel::GlobalAdmin {
        ListScope::All
    } else {
        ListScope::City(actor.city_id)
    }
}

/// Single professional reads: global admin, or same city as the actor.
pub fn can_view_professional(actor: &User, professional: &Professional) -> bool {
    actor.access_level == AccessLevel::GlobalAdmin
        || actor.city_id == Some(professional.city_id)
}

/// Professional writes.
///
/// On create the target is `None` and editors/city admins are
/// provisionally allowed without cross-checking the assigned city.
pub fn can_edit_professional(actor: &User, target: Option<&Professional>) -> bool {
    match actor.access_level {
        AccessLevel::GlobalAdmin => true,
        AccessLevel::CityAdmin | AccessLevel::Editor => match target {
            Some(professional) => actor.city_id == Some(professional.city_id),
            None => true,
        },
        AccessLevel::Viewer => false,
    }
}

/// Mutating a specific user: city admins stay within their own city.
pub fn can_touch_user(actor: &User, target: &User) -> bool {
    match actor.access_level {
        AccessLevel::GlobalAdmin => true,
        AccessLevel::CityAdmin => actor.city_id == target.city_id,
        _ => false,
    }
}

/// City admins may never create or promote a global admin.
pub fn can_assign_level(actor: &User, level: AccessLevel) -> bool {
    !(actor.access_level == AccessLevel::CityAdmin && level == AccessLevel::GlobalAdmin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(level: AccessLevel, city_id: Option<i32>) -> User {
        User {
            id: 1,
            full_name: "Teste".to_string(),
            email: "teste@example.com".to_string(),
            password_hash: "hash".to_string(),
            access_level: level,
            city_id,
            created_at: Utc::now(),
        }
    }

    fn professional(city_id: i32) -> Professional {
        Professional {
            id: 10,
            equipment_id: 1,
            full_name: "Profissional".to_string(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            cpf: "000.000.000-00".to_string(),
            rg: "12345".to_string(),
            rg_issue_date: chrono::NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            education_level: "Superior".to_string(),
            profession: "Psicólogo".to_string(),
            role: "Técnico".to_string(),
            affiliation: "Municipal".to_string(),
            phone: "(85) 99999-0000".to_string(),
            email: "prof@example.com".to_string(),
            employment_start_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            address: "Rua A, 1".to_string(),
            city_id,
            created_at: Utc::now(),
            active: true,
            inactivation_reason: None,
            inactivated_at: None,
        }
    }

    #[test]
    fn catalog_writes_require_city_admin() {
        assert!(!can_manage_catalog(&user(AccessLevel::Viewer, Some(1))));
        assert!(!can_manage_catalog(&user(AccessLevel::Editor, Some(1))));
        assert!(can_manage_catalog(&user(AccessLevel::CityAdmin, Some(1))));
        assert!(can_manage_catalog(&user(AccessLevel::GlobalAdmin, None)));
    }

    #[test]
    fn global_admin_lists_everything() {
        let actor = user(AccessLevel::GlobalAdmin, None);
        assert_eq!(professional_scope(&actor), ListScope::All);
    }

    #[test]
    fn sub_admin_listing_is_scoped_to_own_city() {
        let actor = user(AccessLevel::Editor, Some(3));
        assert_eq!(professional_scope(&actor), ListScope::City(Some(3)));
    }

    #[test]
    fn sub_admin_without_city_sees_nothing_city_scoped() {
        let actor = user(AccessLevel::CityAdmin, None);
        assert_eq!(professional_scope(&actor), ListScope::City(None));
    }

    #[test]
    fn single_read_requires_same_city_or_global_admin() {
        let target = professional(5);
        assert!(can_view_professional(&user(AccessLevel::Viewer, Some(5)), &target));
        assert!(!can_view_professional(&user(AccessLevel::Viewer, Some(7)), &target));
        assert!(!can_view_professional(&user(AccessLevel::CityAdmin, None), &target));
        assert!(can_view_professional(&user(AccessLevel::GlobalAdmin, None), &target));
    }

    #[test]
    fn viewer_never_edits_professionals() {
        assert!(!can_edit_professional(&user(AccessLevel::Viewer, Some(5)), None));
        assert!(!can_edit_professional(
            &user(AccessLevel::Viewer, Some(5)),
            Some(&professional(5))
        ));
    }

    #[test]
    fn editor_edits_only_own_city() {
        let actor = user(AccessLevel::Editor, Some(5));
        assert!(can_edit_professional(&actor, Some(&professional(5))));
        assert!(!can_edit_professional(&actor, Some(&professional(7))));
    }

    #[test]
    fn city_admin_edits_only_own_city() {
        let actor = user(AccessLevel::CityAdmin, Some(5));
        assert!(can_edit_professional(&actor, Some(&professional(5))));
        assert!(!can_edit_professional(&actor, Some(&professional(7))));
    }

    #[test]
    fn global_admin_is_never_denied_on_city_grounds() {
        let actor = user(AccessLevel::GlobalAdmin, Some(1));
        assert!(can_edit_professional(&actor, Some(&professional(7))));
        assert!(can_view_professional(&actor, &professional(7)));
    }

    #[test]
    fn create_is_provisionally_allowed_for_editors() {
        assert!(can_edit_professional(&user(AccessLevel::Editor, Some(5)), None));
        assert!(can_edit_professional(&user(AccessLevel::CityAdmin, Some(5)), None));
    }

    #[test]
    fn city_admin_touches_only_same_city_users() {
        let actor = user(AccessLevel::CityAdmin, Some(5));
        assert!(can_touch_user(&actor, &user(AccessLevel::Viewer, Some(5))));
        assert!(!can_touch_user(&actor, &user(AccessLevel::Viewer, Some(7))));
        assert!(can_touch_user(
            &user(AccessLevel::GlobalAdmin, None),
            &user(AccessLevel::Viewer, Some(7))
        ));
    }

    #[test]
    fn city_admin_cannot_mint_global_admins() {
        let actor = user(AccessLevel::CityAdmin, Some(5));
        assert!(!can_assign_level(&actor, AccessLevel::GlobalAdmin));
        assert!(can_assign_level(&actor, AccessLevel::CityAdmin));
        assert!(can_assign_level(
            &user(AccessLevel::GlobalAdmin, None),
            AccessLevel::GlobalAdmin
        ));
    }

    #[test]
    fn export_requires_editor_or_better() {
        assert!(!can_export(&user(AccessLevel::Viewer, Some(1))));
        assert!(can_export(&user(AccessLevel::Editor, Some(1))));
        assert!(can_view_audit(&user(AccessLevel::CityAdmin, Some(1))));
        assert!(!can_view_audit(&user(AccessLevel::Editor, Some(1))));
    }
}
