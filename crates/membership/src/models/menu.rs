use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::MembershipError;

/// Dashboard sections, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MenuItem {
    #[serde(rename = "home")]
    Home,
    Athletes,
    Fees,
    ActiveAthletes,
    CreateUsers,
    #[serde(rename = "signout")]
    SignOut,
}

impl MenuItem {
    pub const ALL: [MenuItem; 6] = [
        MenuItem::Home,
        MenuItem::Athletes,
        MenuItem::Fees,
        MenuItem::ActiveAthletes,
        MenuItem::CreateUsers,
        MenuItem::SignOut,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Athletes => "Athletes",
            Self::Fees => "Fees",
            Self::ActiveAthletes => "ActiveAthletes",
            Self::CreateUsers => "CreateUsers",
            Self::SignOut => "signout",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Athletes => "Athletes",
            Self::Fees => "Fees",
            Self::ActiveAthletes => "Active athletes",
            Self::CreateUsers => "Create new user",
            Self::SignOut => "Sign out",
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for MenuItem {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|item| item.value().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MembershipError::UnknownMenuItem(s.to_string()))
    }
}

/// User role as encoded by the auth backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Admin,
    Finance,
    Other(i32),
}

impl Role {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Owner,
            1 => Self::Admin,
            3 => Self::Finance,
            other => Self::Other(other),
        }
    }

    pub fn can_see(&self, item: MenuItem) -> bool {
        match self {
            Self::Owner | Self::Admin => true,
            Self::Finance => matches!(item, MenuItem::Home | MenuItem::SignOut),
            Self::Other(_) => item == MenuItem::SignOut,
        }
    }
}

/// Menu for a user whose role list is `roles`. Only the first code is
/// considered; an empty list (nobody signed in) only offers sign out.
pub fn accessible_menu(roles: &[i32]) -> Vec<MenuItem> {
    let Some(role) = roles.first().copied().map(Role::from_code) else {
        return vec![MenuItem::SignOut];
    };

    MenuItem::ALL
        .into_iter()
        .filter(|item| role.can_see(*item))
        .collect()
}
