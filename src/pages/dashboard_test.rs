use super::*;

fn slugs(sections: &[Section]) -> Vec<&'static str> {
    sections.iter().map(|s| s.slug).collect()
}

// =============================================================
// visible_sections
// =============================================================

#[test]
fn admin_sees_every_section() {
    assert_eq!(slugs(&visible_sections(Some(&Role::Admin))), ["tasks", "clients", "hr", "finance", "reports", "docs"]);
}

#[test]
fn hr_and_finance_see_only_their_restricted_section() {
    assert_eq!(slugs(&visible_sections(Some(&Role::Hr))), ["tasks", "clients", "hr", "reports", "docs"]);
    assert_eq!(slugs(&visible_sections(Some(&Role::Finance))), ["tasks", "clients", "finance", "reports", "docs"]);
}

#[test]
fn other_roles_see_open_sections() {
    let open = ["tasks", "clients", "reports", "docs"];
    assert_eq!(slugs(&visible_sections(Some(&Role::Employee))), open);
    assert_eq!(slugs(&visible_sections(Some(&Role::Other("intern".to_owned())))), open);
    assert_eq!(slugs(&visible_sections(None)), open);
}

// =============================================================
// routes
// =============================================================

#[test]
fn section_href_nests_under_dashboard() {
    assert_eq!(section_href(&SECTIONS[0]), "/dashboard/tasks");
}

#[test]
fn role_homes_match_a_section() {
    for role in [Role::Hr, Role::Finance, Role::Client, Role::Employee, Role::Marketing] {
        let home = role.home_path();
        assert!(SECTIONS.iter().any(|s| section_href(s) == home), "{role} home {home} has no section");
    }
}

#[test]
fn restricted_sections_admit_admin() {
    assert!(hr_roles().contains(&Role::Admin));
    assert!(finance_roles().contains(&Role::Admin));
}
