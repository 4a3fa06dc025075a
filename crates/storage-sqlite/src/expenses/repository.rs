use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Date, Text};
use log::debug;
use uuid::Uuid;

use fintrack_core::expenses::{
    CategoryTotal, Expense, ExpenseFilter, ExpenseRepositoryTrait, ExpenseUpdate, NewExpense,
};
use fintrack_core::Result;

use super::model::{CategoryTotalRow, ExpenseChangeset, ExpenseDB, NewExpenseDB, SpendingTotalRow};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::expenses;
use crate::utils::like_pattern;

pub struct ExpenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ExpenseRepository { pool, writer }
    }
}

fn to_domain(rows: Vec<ExpenseDB>) -> Result<Vec<Expense>> {
    rows.into_iter()
        .map(|row| Expense::try_from(row).map_err(Into::into))
        .collect()
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    async fn create(&self, owner: &str, new_expense: NewExpense) -> Result<Expense> {
        let row = NewExpenseDB {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.to_string(),
            title: new_expense.title,
            category: new_expense.category.as_str().to_string(),
            amount_cents: new_expense.amount_cents,
            expense_date: new_expense.date,
            note: new_expense.note,
            created_at: Utc::now().naive_utc(),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let created = diesel::insert_into(expenses::table)
                    .values(&row)
                    .returning(ExpenseDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Expense::try_from(created)?)
            })
            .await
    }

    fn list(&self, owner: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = expenses::table
            .filter(expenses::owner_id.eq(owner))
            .select(ExpenseDB::as_select())
            .into_boxed();

        if let Some(from) = filter.from {
            query = query.filter(expenses::expense_date.ge(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(expenses::expense_date.le(to));
        }
        if let Some(category) = filter.category {
            query = query.filter(expenses::category.eq(category.as_str()));
        }
        if let Some(title) = &filter.title {
            query = query.filter(expenses::title.like(like_pattern(title)).escape('\\'));
        }
        if let Some(cursor) = &filter.cursor {
            query = query.filter(
                expenses::expense_date.lt(cursor.date).or(expenses::expense_date
                    .eq(cursor.date)
                    .and(
                        expenses::created_at.lt(cursor.created_at).or(expenses::created_at
                            .eq(cursor.created_at)
                            .and(expenses::id.lt(cursor.id.clone()))),
                    )),
            );
        }

        let rows = query
            .order_by((
                expenses::expense_date.desc(),
                expenses::created_at.desc(),
                expenses::id.desc(),
            ))
            .limit(filter.limit)
            .load::<ExpenseDB>(&mut conn)
            .into_core()?;
        debug!("Loaded {} expense rows", rows.len());
        to_domain(rows)
    }

    fn get(&self, owner: &str, expense_id: &str) -> Result<Option<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        expenses::table
            .filter(expenses::id.eq(expense_id))
            .filter(expenses::owner_id.eq(owner))
            .select(ExpenseDB::as_select())
            .first::<ExpenseDB>(&mut conn)
            .optional()
            .into_core()?
            .map(|row| Expense::try_from(row).map_err(Into::into))
            .transpose()
    }

    async fn update(
        &self,
        owner: &str,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Option<Expense>> {
        let owner = owner.to_string();
        let expense_id = expense_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Expense>> {
                let target = expenses::table
                    .filter(expenses::id.eq(&expense_id))
                    .filter(expenses::owner_id.eq(&owner));

                let row = if update.is_empty() {
                    target
                        .select(ExpenseDB::as_select())
                        .first::<ExpenseDB>(conn)
                        .optional()
                } else {
                    let changeset = ExpenseChangeset::from(update);
                    diesel::update(target)
                        .set(&changeset)
                        .returning(ExpenseDB::as_returning())
                        .get_result::<ExpenseDB>(conn)
                        .optional()
                }
                .map_err(StorageError::from)?;

                Ok(row.map(Expense::try_from).transpose()?)
            })
            .await
    }

    async fn delete(&self, owner: &str, expense_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let expense_id = expense_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    expenses::table
                        .filter(expenses::id.eq(expense_id))
                        .filter(expenses::owner_id.eq(owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    fn total_spending(&self, owner: &str, start: NaiveDate, end: NaiveDate) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let row = diesel::sql_query(
            "SELECT COALESCE(SUM(amount_cents), 0) AS total_cents \
             FROM expenses \
             WHERE owner_id = ? AND expense_date BETWEEN ? AND ?",
        )
        .bind::<Text, _>(owner)
        .bind::<Date, _>(start)
        .bind::<Date, _>(end)
        .get_result::<SpendingTotalRow>(&mut conn)
        .into_core()?;
        Ok(row.total_cents)
    }

    fn spending_by_category(
        &self,
        owner: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CategoryTotal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = diesel::sql_query(
            "SELECT category, SUM(amount_cents) AS total_cents \
             FROM expenses \
             WHERE owner_id = ? AND expense_date BETWEEN ? AND ? \
             GROUP BY category \
             ORDER BY total_cents DESC, category ASC",
        )
        .bind::<Text, _>(owner)
        .bind::<Date, _>(start)
        .bind::<Date, _>(end)
        .load::<CategoryTotalRow>(&mut conn)
        .into_core()?;

        rows.into_iter()
            .map(|row| CategoryTotal::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;
    use fintrack_core::expenses::ExpenseCursor;
    use fintrack_core::Category;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_expense(title: &str, category: Category, cents: i64, on: &str) -> NewExpense {
        NewExpense {
            title: title.to_string(),
            category,
            amount_cents: cents,
            date: date(on),
            note: None,
        }
    }

    fn repo(db: &TestDb) -> ExpenseRepository {
        ExpenseRepository::new(db.pool.clone(), db.writer.clone())
    }

    #[tokio::test]
    async fn create_and_get_are_owner_scoped() {
        let db = TestDb::new();
        let repo = repo(&db);
        let created = repo
            .create("alice", new_expense("Coffee", Category::Food, 1999, "2024-03-02"))
            .await
            .unwrap();

        assert_eq!(created.amount_cents, 1999);
        assert_eq!(
            repo.get("alice", &created.id).unwrap().unwrap().title,
            "Coffee"
        );
        assert!(repo.get("bob", &created.id).unwrap().is_none());
        assert_eq!(repo.delete("bob", &created.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_filters_by_inclusive_date_range() {
        let db = TestDb::new();
        let repo = repo(&db);
        for on in ["2024-02-29", "2024-03-01", "2024-03-15", "2024-03-31", "2024-04-01"] {
            repo.create("alice", new_expense(on, Category::Food, 100, on))
                .await
                .unwrap();
        }

        let filter = ExpenseFilter {
            from: Some(date("2024-03-01")),
            to: Some(date("2024-03-31")),
            ..Default::default()
        };
        let titles: Vec<String> = repo
            .list("alice", &filter)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, ["2024-03-31", "2024-03-15", "2024-03-01"]);

        let open_ended = ExpenseFilter {
            from: Some(date("2024-03-31")),
            ..Default::default()
        };
        assert_eq!(repo.list("alice", &open_ended).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn title_filter_is_case_insensitive_and_literal() {
        let db = TestDb::new();
        let repo = repo(&db);
        repo.create("alice", new_expense("Weekly Groceries", Category::Food, 100, "2024-03-01"))
            .await
            .unwrap();
        repo.create("alice", new_expense("50% off shoes", Category::Other, 100, "2024-03-01"))
            .await
            .unwrap();

        let by_title = |needle: &str| {
            let filter = ExpenseFilter {
                title: Some(needle.to_string()),
                ..Default::default()
            };
            repo.list("alice", &filter).unwrap().len()
        };
        assert_eq!(by_title("groceries"), 1);
        assert_eq!(by_title("%"), 1);
        assert_eq!(by_title("_"), 0);
    }

    #[tokio::test]
    async fn cursor_pages_through_ties_without_gaps() {
        let db = TestDb::new();
        let repo = repo(&db);
        for n in 0..5 {
            repo.create(
                "alice",
                new_expense(&format!("e{n}"), Category::Food, 100, "2024-03-01"),
            )
            .await
            .unwrap();
        }

        let mut seen = Vec::new();
        let mut cursor = None;
        loop {
            let filter = ExpenseFilter {
                limit: 2,
                cursor: cursor.clone(),
                ..Default::default()
            };
            let page = repo.list("alice", &filter).unwrap();
            if page.is_empty() {
                break;
            }
            cursor = page.last().map(ExpenseCursor::after);
            seen.extend(page.into_iter().map(|e| e.title));
        }
        assert_eq!(seen, ["e4", "e3", "e2", "e1", "e0"]);
    }

    #[tokio::test]
    async fn partial_update_touches_only_supplied_fields() {
        let db = TestDb::new();
        let repo = repo(&db);
        let mut input = new_expense("Rent", Category::Housing, 120000, "2024-03-01");
        input.note = Some("March".to_string());
        let created = repo.create("alice", input).await.unwrap();

        let updated = repo
            .update(
                "alice",
                &created.id,
                ExpenseUpdate {
                    amount_cents: Some(125000),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.amount_cents, 125000);
        assert_eq!(updated.title, "Rent");
        assert_eq!(updated.note.as_deref(), Some("March"));

        let cleared = repo
            .update(
                "alice",
                &created.id,
                ExpenseUpdate {
                    note: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.note, None);

        let missing = repo
            .update(
                "bob",
                &created.id,
                ExpenseUpdate {
                    amount_cents: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn aggregates_cover_window_and_agree() {
        let db = TestDb::new();
        let repo = repo(&db);
        for (title, category, cents, on) in [
            ("a", Category::Food, 12000, "2024-03-01"),
            ("b", Category::Food, 13000, "2024-03-31"),
            ("c", Category::Utilities, 25000, "2024-03-10"),
            ("d", Category::Housing, 5000, "2024-03-12"),
            ("e", Category::Food, 99999, "2024-04-01"),
        ] {
            repo.create("alice", new_expense(title, category, cents, on))
                .await
                .unwrap();
        }
        repo.create("bob", new_expense("x", Category::Food, 777, "2024-03-05"))
            .await
            .unwrap();

        let (start, end) = (date("2024-03-01"), date("2024-03-31"));
        let total = repo.total_spending("alice", start, end).unwrap();
        let by_category = repo.spending_by_category("alice", start, end).unwrap();

        assert_eq!(total, 55000);
        assert_eq!(
            by_category,
            vec![
                CategoryTotal {
                    category: Category::Food,
                    total_cents: 25000
                },
                CategoryTotal {
                    category: Category::Utilities,
                    total_cents: 25000
                },
                CategoryTotal {
                    category: Category::Housing,
                    total_cents: 5000
                },
            ]
        );
        assert_eq!(
            by_category.iter().map(|c| c.total_cents).sum::<i64>(),
            total
        );
        assert_eq!(repo.total_spending("carol", start, end).unwrap(), 0);
    }
}
