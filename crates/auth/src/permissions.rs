use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::Role;

/// A grant key: the two-part (resource, action) pair authorization is
/// checked against. Matching is exact and case-sensitive; there are no
/// wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceAction {
    pub resource: String,
    pub action: String,
}

impl ResourceAction {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    fn matches(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.action == action
    }
}

impl core::fmt::Display for ResourceAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.resource, self.action)
    }
}

/// Static mapping from role name to the set of allowed (resource, action)
/// pairs.
///
/// Built once at process start and shared read-only for the rest of the
/// process lifetime; there is no runtime mutation or reload path.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    grants: HashMap<String, HashSet<ResourceAction>>,
}

impl PermissionTable {
    pub fn builder() -> PermissionTableBuilder {
        PermissionTableBuilder::default()
    }

    /// The deployed grant set for the three school roles.
    pub fn defaults() -> Self {
        Self::builder()
            .grant_all(
                Role::Admin,
                "Category",
                ["Index", "Create", "Edit", "Delete"],
            )
            .grant_all(Role::Admin, "Course", ["Index", "Create", "Edit", "Delete"])
            .grant_all(
                Role::Admin,
                "ClassRoom",
                [
                    "Index",
                    "Create",
                    "Edit",
                    "Delete",
                    "AddStudentToClass",
                    "Details",
                ],
            )
            .grant_all(Role::Admin, "Student", ["Index", "Create", "Edit", "Delete"])
            .grant_all(Role::Admin, "Teacher", ["Index", "Create", "Edit", "Delete"])
            .grant(Role::Admin, "Register", "Index")
            .grant_all(Role::Student, "ClassRoom", ["Index", "Details"])
            .grant(Role::Student, "Student", "Index")
            .grant(Role::Student, "Course", "Index")
            .grant(Role::Teacher, "Course", "Index")
            .grant(Role::Teacher, "Student", "Index")
            .grant(Role::Teacher, "Teacher", "Index")
            .grant_all(Role::Teacher, "ClassRoom", ["Index", "Details"])
            .build()
    }

    /// Evaluate a grant. Fail-closed: an empty or unrecognized role name
    /// yields `false` for every pair, and absence of a grant is always
    /// expressed as `false`, never as an error.
    pub fn can_perform_action(&self, role: &str, resource: &str, action: &str) -> bool {
        let Some(granted) = self.grants.get(role) else {
            return false;
        };
        granted.iter().any(|g| g.matches(resource, action))
    }

    /// Grants held by one role, for display. Unknown roles read as empty.
    pub fn grants_for(&self, role: &str) -> Vec<ResourceAction> {
        let mut grants: Vec<ResourceAction> = self
            .grants
            .get(role)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        grants.sort_by(|a, b| (&a.resource, &a.action).cmp(&(&b.resource, &b.action)));
        grants
    }
}

/// Builder for [`PermissionTable`]. Grants form a set: re-granting the same
/// pair is a no-op.
#[derive(Debug, Default)]
pub struct PermissionTableBuilder {
    grants: HashMap<String, HashSet<ResourceAction>>,
}

impl PermissionTableBuilder {
    pub fn grant(mut self, role: Role, resource: &str, action: &str) -> Self {
        self.grants
            .entry(role.as_str().to_string())
            .or_default()
            .insert(ResourceAction::new(resource, action));
        self
    }

    pub fn grant_all<'a>(
        mut self,
        role: Role,
        resource: &str,
        actions: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        for action in actions {
            self = self.grant(role, resource, action);
        }
        self
    }

    pub fn build(self) -> PermissionTable {
        PermissionTable {
            grants: self.grants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_unknown_role_is_denied_everything() {
        let table = PermissionTable::defaults();

        for (resource, action) in [("Category", "Index"), ("Student", "Delete")] {
            assert!(!table.can_perform_action("", resource, action));
            assert!(!table.can_perform_action("Principal", resource, action));
            assert!(!table.can_perform_action("admin", resource, action));
        }
    }

    #[test]
    fn admin_grants_are_exhaustive_per_table() {
        let table = PermissionTable::defaults();

        for action in ["Index", "Create", "Edit", "Delete"] {
            assert!(table.can_perform_action("Admin", "Category", action));
            assert!(table.can_perform_action("Admin", "Course", action));
            assert!(table.can_perform_action("Admin", "Student", action));
            assert!(table.can_perform_action("Admin", "Teacher", action));
            assert!(table.can_perform_action("Admin", "ClassRoom", action));
        }
        assert!(table.can_perform_action("Admin", "ClassRoom", "AddStudentToClass"));
        assert!(table.can_perform_action("Admin", "ClassRoom", "Details"));
        assert!(table.can_perform_action("Admin", "Register", "Index"));
    }

    #[test]
    fn student_reads_but_never_writes() {
        let table = PermissionTable::defaults();

        assert!(table.can_perform_action("Student", "Course", "Index"));
        assert!(table.can_perform_action("Student", "Student", "Index"));
        assert!(table.can_perform_action("Student", "ClassRoom", "Index"));
        assert!(table.can_perform_action("Student", "ClassRoom", "Details"));

        assert!(!table.can_perform_action("Student", "Course", "Create"));
        assert!(!table.can_perform_action("Student", "Category", "Index"));
        assert!(!table.can_perform_action("Student", "Student", "Delete"));
        assert!(!table.can_perform_action("Student", "ClassRoom", "AddStudentToClass"));
    }

    #[test]
    fn teacher_reads_but_never_writes() {
        let table = PermissionTable::defaults();

        assert!(table.can_perform_action("Teacher", "Course", "Index"));
        assert!(table.can_perform_action("Teacher", "Teacher", "Index"));
        assert!(table.can_perform_action("Teacher", "ClassRoom", "Details"));

        assert!(!table.can_perform_action("Teacher", "Course", "Edit"));
        assert!(!table.can_perform_action("Teacher", "Category", "Index"));
        assert!(!table.can_perform_action("Teacher", "Register", "Index"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let table = PermissionTable::defaults();

        assert!(table.can_perform_action("Admin", "Category", "Index"));
        assert!(!table.can_perform_action("Admin", "category", "Index"));
        assert!(!table.can_perform_action("Admin", "Category", "index"));
    }

    #[test]
    fn regranting_is_a_set_operation() {
        let table = PermissionTable::builder()
            .grant(Role::Teacher, "Course", "Index")
            .grant(Role::Teacher, "Course", "Index")
            .build();

        assert_eq!(table.grants_for("Teacher").len(), 1);
        assert!(table.can_perform_action("Teacher", "Course", "Index"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any role name outside the table is denied every pair.
            #[test]
            fn unknown_roles_fail_closed(
                role in "[A-Za-z0-9_-]{0,24}",
                resource in "[A-Za-z]{1,16}",
                action in "[A-Za-z]{1,16}",
            ) {
                prop_assume!(!matches!(role.as_str(), "Admin" | "Teacher" | "Student"));
                let table = PermissionTable::defaults();
                prop_assert!(!table.can_perform_action(&role, &resource, &action));
            }

            /// Property: evaluation never observes a grant the builder was not
            /// given, whatever pair is asked about.
            #[test]
            fn only_built_grants_are_allowed(
                resource in "[A-Za-z]{1,16}",
                action in "[A-Za-z]{1,16}",
            ) {
                let table = PermissionTable::builder()
                    .grant(Role::Student, "Course", "Index")
                    .build();

                let expected = resource == "Course" && action == "Index";
                prop_assert_eq!(
                    table.can_perform_action("Student", &resource, &action),
                    expected
                );
            }
        }
    }
}
