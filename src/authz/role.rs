use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Staff role of a profile. Closed set; maps onto the `profile_role`
/// Postgres enum.
///
/// Group membership is only ever computed through the predicates below.
/// Nothing else in the crate is allowed to spell out role lists, so adding a
/// role here is the single place where every grouping decision gets made.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "profile_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superadmin,
    HeadSales,
    Sales,
    HeadTeaching,
    Teacher,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Superadmin,
        Role::HeadSales,
        Role::Sales,
        Role::HeadTeaching,
        Role::Teacher,
    ];

    pub fn is_teaching_staff(self) -> bool {
        matches!(self, Role::Teacher | Role::HeadTeaching)
    }

    pub fn is_sales_staff(self) -> bool {
        matches!(self, Role::Sales | Role::HeadSales)
    }

    pub fn is_management(self) -> bool {
        matches!(self, Role::HeadTeaching | Role::HeadSales | Role::Superadmin)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Superadmin)
    }

    pub fn teaching_staff() -> Vec<Role> {
        Self::ALL.into_iter().filter(|r| r.is_teaching_staff()).collect()
    }

    pub fn sales_staff() -> Vec<Role> {
        Self::ALL.into_iter().filter(|r| r.is_sales_staff()).collect()
    }

    pub fn management() -> Vec<Role> {
        Self::ALL.into_iter().filter(|r| r.is_management()).collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::HeadSales => "head_sales",
            Role::Sales => "sales",
            Role::HeadTeaching => "head_teaching",
            Role::Teacher => "teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::Superadmin),
            "head_sales" => Ok(Role::HeadSales),
            "sales" => Ok(Role::Sales),
            "head_teaching" => Ok(Role::HeadTeaching),
            "teacher" => Ok(Role::Teacher),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_membership_matches_taxonomy() {
        for role in Role::ALL {
            assert_eq!(
                role.is_teaching_staff(),
                matches!(role, Role::Teacher | Role::HeadTeaching),
                "teaching staff membership for {role}"
            );
            assert_eq!(
                role.is_sales_staff(),
                matches!(role, Role::Sales | Role::HeadSales),
                "sales staff membership for {role}"
            );
            assert_eq!(
                role.is_management(),
                matches!(role, Role::HeadTeaching | Role::HeadSales | Role::Superadmin),
                "management membership for {role}"
            );
            assert_eq!(role.is_admin(), matches!(role, Role::Superadmin));
        }
    }

    #[test]
    fn groups_are_derived_from_predicates() {
        assert_eq!(Role::teaching_staff(), vec![Role::HeadTeaching, Role::Teacher]);
        assert_eq!(Role::sales_staff(), vec![Role::HeadSales, Role::Sales]);
        assert_eq!(
            Role::management(),
            vec![Role::Superadmin, Role::HeadSales, Role::HeadTeaching]
        );
    }

    #[test]
    fn roles_round_trip_through_strings() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("student".parse::<Role>().is_err());
    }
}
