// src/db/profiles.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::purchases::purchased_lead_ids;
use crate::domain::{Profile, ProfileUpdate, Role};
use crate::errors::ServerError;

/// Insert a profile if the email is new, then return its id.
/// The role and starting credit only apply to a newly created profile.
/// Email should already be normalized by caller (trim/lowercase).
pub fn get_or_create_profile(
    conn: &Connection,
    email: &str,
    role: Role,
    signup_credit: i64,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        "insert or ignore into profiles (email, role, credit, created_at, updated_at) values (?, ?, ?, ?, ?)",
        params![email, role, signup_credit, now, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert profile failed: {e}")))?;

    conn.query_row(
        "select id from profiles where email = ?",
        params![email],
        |row| row.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("select profile id failed: {e}")))
}

pub fn get_profile(conn: &Connection, profile_id: i64) -> Result<Option<Profile>, ServerError> {
    let profile = conn
        .query_row(
            r#"
            select id, email, role, first_name, last_name, phone, postcode, business_name,
                   trade_specialty, profile_description, credit, is_admin, created_at, last_login_at
              from profiles
             where id = ?
            "#,
            params![profile_id],
            |r| {
                Ok(Profile {
                    id: r.get(0)?,
                    email: r.get(1)?,
                    role: r.get(2)?,
                    first_name: r.get(3)?,
                    last_name: r.get(4)?,
                    phone: r.get(5)?,
                    postcode: r.get(6)?,
                    business_name: r.get(7)?,
                    trade_specialty: r.get(8)?,
                    profile_description: r.get(9)?,
                    credit: r.get(10)?,
                    is_admin: r.get(11)?,
                    created_at: r.get(12)?,
                    last_login_at: r.get(13)?,
                    purchased_leads: Vec::new(),
                })
            },
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("select profile failed: {e}")))?;

    match profile {
        Some(mut p) => {
            p.purchased_leads = purchased_lead_ids(conn, p.id)?;
            Ok(Some(p))
        }
        None => Ok(None),
    }
}

pub fn update_profile(
    conn: &Connection,
    profile_id: i64,
    update: &ProfileUpdate,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        update profiles
           set first_name = ?, last_name = ?, phone = ?, postcode = ?, business_name = ?,
               trade_specialty = ?, profile_description = ?, updated_at = ?
         where id = ?
        "#,
        params![
            update.first_name,
            update.last_name,
            update.phone,
            update.postcode,
            update.business_name,
            update.trade_specialty,
            update.profile_description,
            now,
            profile_id
        ],
    )
    .map_err(|e| ServerError::DbError(format!("update profile failed: {e}")))?;
    Ok(())
}

pub fn set_admin(conn: &Connection, profile_id: i64, is_admin: bool) -> Result<(), ServerError> {
    conn.execute(
        "update profiles set is_admin = ? where id = ?",
        params![is_admin, profile_id],
    )
    .map_err(|e| ServerError::DbError(format!("update admin flag failed: {e}")))?;
    Ok(())
}

pub fn touch_last_login(conn: &Connection, profile_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update profiles set last_login_at = ? where id = ?",
        params![now, profile_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last_login_at failed: {e}")))?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ProfileWithStats {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub postcode: Option<String>,
    pub credit: i64,
    pub is_admin: bool,
    pub purchases: i64,
    pub last_login_at: Option<i64>,
}

pub fn list_profiles_with_stats(conn: &Connection) -> Result<Vec<ProfileWithStats>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select p.id, p.email, p.role, trim(p.first_name || ' ' || p.last_name), p.postcode,
                   p.credit, p.is_admin, count(lp.lead_id), p.last_login_at
              from profiles p
              left join lead_purchases lp on lp.profile_id = p.id
             group by p.id
             order by p.created_at desc, p.id desc
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(ProfileWithStats {
                id: row.get(0)?,
                email: row.get(1)?,
                role: row.get(2)?,
                name: row.get(3)?,
                postcode: row.get(4)?,
                credit: row.get(5)?,
                is_admin: row.get(6)?,
                purchases: row.get(7)?,
                last_login_at: row.get(8)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
