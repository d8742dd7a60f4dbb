//! Student and staff records, keyed by the owning user account.

use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::student)]
#[diesel(check_for_backend(Pg))]
pub struct Student {
    pub id: i32,
    pub user_id: i32,
    pub full_name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::student)]
pub struct NewStudent<'a> {
    pub user_id: i32,
    pub full_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::staff)]
#[diesel(check_for_backend(Pg))]
pub struct Staff {
    pub id: i32,
    pub user_id: i32,
    pub full_name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::staff)]
pub struct NewStaff<'a> {
    pub user_id: i32,
    pub full_name: &'a str,
}
