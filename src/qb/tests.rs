use mysql_async::Value;

use super::*;
use crate::query::Query;
use crate::row;

fn parts(q: Query) -> (String, Vec<Value>) {
    q.into_parts()
}

#[test]
fn select_only() {
    let (sql, args) = parts(select(|b| {
        b.columns(["1"]);
    }));
    assert_eq!(sql, "select 1");
    assert!(args.is_empty());
}

#[test]
fn select_arg_column() {
    let (sql, args) = parts(select(|b| {
        b.columns([arg("x")]);
    }));
    assert_eq!(sql, "select ?");
    assert_eq!(args, vec![Value::from("x")]);
}

#[test]
fn select_raw_columns() {
    let (sql, args) = parts(select(|b| {
        b.columns(["1", "x", "1.2"]);
    }));
    assert_eq!(sql, "select 1, x, 1.2");
    assert!(args.is_empty());
}

#[test]
fn select_from() {
    let (sql, args) = parts(select(|b| {
        b.columns(["id", "name"]);
        b.from("users");
    }));
    assert_eq!(sql, "select id, name from users");
    assert!(args.is_empty());
}

#[test]
fn select_from_where_nested() {
    let (sql, args) = parts(select(|b| {
        b.columns(["id", "name"]);
        b.from("users");
        b.where_with(|c| {
            c.eq("id", 3);
            c.eq("name", "test");
            c.and(|c| {
                c.eq("age", 15);
                c.or(|c| {
                    c.eq("age", 18);
                });
            });
            c.eq("is_active", true);
        });
    }));
    assert_eq!(
        sql,
        "select id, name from users where (id = ? and name = ? and is_active = ?) and ((age = ?) or (age = ?))"
    );
    assert_eq!(
        args,
        vec![
            Value::from(3),
            Value::from("test"),
            Value::from(true),
            Value::from(15),
            Value::from(18),
        ]
    );
}

#[test]
fn select_order_by() {
    let (sql, args) = parts(select(|b| {
        b.columns(["id", "name"]);
        b.from("users");
        b.where_with(|c| c.eq("id", 1));
        b.order_by("created_at").asc().nulls_last();
        b.order_by("id").desc();
    }));
    assert_eq!(
        sql,
        "select id, name from users where (id = ?) order by created_at asc nulls last, id desc"
    );
    assert_eq!(args, vec![Value::from(1)]);
}

#[test]
fn select_limit_offset() {
    let (sql, args) = parts(select(|b| {
        b.columns(["id", "name"]);
        b.from("users");
        b.where_with(|c| c.eq("id", 1));
        b.order_by("id");
        b.limit(5);
        b.offset(10);
    }));
    assert_eq!(
        sql,
        "select id, name from users where (id = ?) order by id limit 5 offset 10"
    );
    assert_eq!(args, vec![Value::from(1)]);
}

#[test]
fn join_raw_table() {
    let (sql, args) = parts(select(|b| {
        b.columns(["id", "name"]);
        b.from("users");
        b.left_join("roles using id");
    }));
    assert_eq!(sql, "select id, name from users left join roles using id");
    assert!(args.is_empty());
}

#[test]
fn join_on() {
    let (sql, _) = parts(select(|b| {
        b.columns(["id", "name"]);
        b.from("users");
        b.left_join("roles").on(|c| {
            c.eq_raw("users.id", "roles.id");
        });
    }));
    assert_eq!(
        sql,
        "select id, name from users left join roles on (users.id = roles.id)"
    );
}

#[test]
fn join_using() {
    let (sql, _) = parts(select(|b| {
        b.columns(["id", "name"]);
        b.from("users");
        b.inner_join("roles").using(["id", "name"]);
    }));
    assert_eq!(
        sql,
        "select id, name from users inner join roles using (id, name)"
    );
}

#[test]
fn join_derived_table() {
    let (sql, _) = parts(select(|b| {
        b.columns(["id", "name", "count(*)"]);
        b.from("users");
        b.left_join_select(
            |b| {
                b.columns(["user_id", "data"]);
                b.from("event");
            },
            "t",
        )
        .on(|c| {
            c.eq_raw("t.user_id", "users.id");
        });
        b.group_by(["id", "name"]);
    }));
    assert_eq!(
        sql,
        "select id, name, count(*) from users left join (select user_id, data from event) t on (t.user_id = users.id) group by (id, name)"
    );
}

#[test]
fn group_by_having() {
    let (sql, _) = parts(select(|b| {
        b.columns(["city", "max(temp_lo)"]);
        b.from("weather");
        b.group_by(["city"]);
        b.having_with(|c| {
            c.lt_raw("max(temp_lo)", 40);
        });
    }));
    assert_eq!(
        sql,
        "select city, max(temp_lo) from weather group by (city) having (max(temp_lo) < 40)"
    );
}

#[test]
fn where_in() {
    let (sql, args) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| c.in_list("x", [1, 2]));
    }));
    assert_eq!(sql, "select * from table where (x in (?, ?))");
    assert_eq!(args, vec![Value::from(1), Value::from(2)]);
}

#[test]
fn where_in_select() {
    let (sql, args) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| {
            c.in_select("id", |b| {
                b.columns(["id"]);
                b.from("table2");
            });
        });
    }));
    assert_eq!(sql, "select * from table where (id in (select id from table2))");
    assert!(args.is_empty());
}

#[test]
fn where_not_in() {
    let (sql, args) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| c.not_in("x", [1, 2]));
    }));
    assert_eq!(sql, "select * from table where (x not in (?, ?))");
    assert_eq!(args, vec![Value::from(1), Value::from(2)]);
}

#[test]
fn where_empty_in_renders_constant_false() {
    let (sql, args) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| c.in_list("x", Vec::<i64>::new()));
    }));
    assert_eq!(sql, "select * from table where (1=0)");
    assert!(args.is_empty());
}

#[test]
fn where_empty_not_in_renders_constant_true() {
    let (sql, _) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| c.not_in("x", Vec::<i64>::new()));
    }));
    assert_eq!(sql, "select * from table where (1=1)");
}

#[test]
fn where_and_mode() {
    let (sql, _) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| {
            c.mode().and();
            c.eq_raw("a", 1);
            c.eq_raw("a", 2);
        });
    }));
    assert_eq!(sql, "select * from table where (a = 1 and a = 2)");
}

#[test]
fn where_or_mode() {
    let (sql, _) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| {
            c.mode().or();
            c.eq_raw("a", 1);
            c.eq_raw("a", 2);
        });
    }));
    assert_eq!(sql, "select * from table where (a = 1 or a = 2)");
}

#[test]
fn where_nested_or_mode() {
    let (sql, _) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| {
            c.eq_raw("a", 1);
            c.and(|c| {
                c.mode().or();
                c.eq_raw("a", 2);
                c.eq_raw("a", 3);
            });
        });
    }));
    assert_eq!(sql, "select * from table where (a = 1) and (a = 2 or a = 3)");
}

#[test]
fn where_nested_and() {
    let (sql, _) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| {
            c.eq_raw("a", 1);
            c.eq_raw("b", 1);
            c.and(|c| {
                c.and(|c| {
                    c.eq_raw("c", 1);
                    c.eq_raw("d", 1);
                });
                c.or(|c| {
                    c.eq_raw("e", 1);
                    c.eq_raw("f", 1);
                });
            });
        });
    }));
    assert_eq!(
        sql,
        "select * from table where (a = 1 and b = 1) and ((c = 1 and d = 1) or (e = 1 and f = 1))"
    );
}

#[test]
fn where_single_child_collapses() {
    let (sql, _) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| {
            c.eq_raw("a", 1);
            c.eq_raw("b", 1);
            c.and(|c| {
                // nothing to `or` with
                c.or(|c| {
                    c.eq_raw("c", 1);
                    c.eq_raw("d", 1);
                });
            });
        });
    }));
    assert_eq!(
        sql,
        "select * from table where (a = 1 and b = 1) and (c = 1 and d = 1)"
    );
}

#[test]
fn where_only_nested_child() {
    let (sql, _) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|c| {
            c.and(|c| {
                c.mode().or();
                c.eq_raw("a", 2);
                c.eq_raw("a", 3);
            });
        });
    }));
    assert_eq!(sql, "select * from table where (a = 2 or a = 3)");
}

#[test]
fn where_empty_renders_nothing() {
    let (sql, args) = parts(select(|b| {
        b.columns(["*"]);
        b.from("table");
        b.where_with(|_| {});
    }));
    assert_eq!(sql, "select * from table");
    assert!(args.is_empty());
}

#[test]
fn select_distinct() {
    let (sql, _) = parts(select(|b| {
        b.distinct();
        b.columns(["col_1"]);
    }));
    assert_eq!(sql, "select distinct col_1");
}

#[test]
fn select_distinct_on() {
    let (sql, _) = parts(select(|b| {
        b.distinct().on(["col_1", "col_2"]);
        b.columns(["col_1", "col_3"]);
    }));
    assert_eq!(sql, "select distinct on (col_1, col_2) col_1, col_3");
}

#[test]
fn left_join_lateral_raw() {
    let (sql, _) = parts(select(|b| {
        b.columns(["m.name"]);
        b.from("manufacturers m");
        b.left_join("lateral get_product_names(m.id) pname").on(|c| {
            c.raw("true");
        });
        b.where_with(|c| c.is_null("pname"));
    }));
    assert_eq!(
        sql,
        "select m.name from manufacturers m left join lateral get_product_names(m.id) pname on (true) where (pname is null)"
    );
}

#[test]
fn left_join_lateral_select() {
    let (sql, _) = parts(select(|b| {
        b.columns(["m.name"]);
        b.from("manufacturers m");
        b.left_join_lateral_select(
            |b| {
                b.columns(["get_product_names(m.id) pname"]);
            },
            "t",
        )
        .on(|c| {
            c.raw("true");
        });
        b.where_with(|c| c.is_null("pname"));
    }));
    assert_eq!(
        sql,
        "select m.name from manufacturers m left join lateral (select get_product_names(m.id) pname) t on (true) where (pname is null)"
    );
}

#[test]
fn insert_rows_with_default() {
    let (sql, args) = parts(insert(|b| {
        b.into("users");
        b.columns(["username", "name", "created_at"]);
        b.value(row!["tester1", "Tester 1", Term::Default]);
        b.value(row!["tester2", "Tester 2", "now()"]);
    }));
    assert_eq!(
        sql,
        "insert into users (username, name, created_at) values (?, ?, default), (?, ?, ?)"
    );
    assert_eq!(
        args,
        vec![
            Value::from("tester1"),
            Value::from("Tester 1"),
            Value::from("tester2"),
            Value::from("Tester 2"),
            Value::from("now()"),
        ]
    );
}

#[test]
fn insert_from_select() {
    let (sql, args) = parts(insert(|b| {
        b.into("films");
        b.select(|b| {
            b.columns(["*"]);
            b.from("tmp_films");
            b.where_with(|c| c.lt_raw("date_prod", "2004-05-07"));
        });
    }));
    assert_eq!(
        sql,
        "insert into films select * from tmp_films where (date_prod < 2004-05-07)"
    );
    assert!(args.is_empty());
}

#[test]
fn insert_values_one_row_each() {
    let (sql, args) = parts(insert(|b| {
        b.into("tags");
        b.columns(["name"]);
        b.values(["a", "b"]);
    }));
    assert_eq!(sql, "insert into tags (name) values (?), (?)");
    assert_eq!(args, vec![Value::from("a"), Value::from("b")]);
}

#[test]
fn insert_default_values() {
    let (sql, args) = parts(insert(|b| {
        b.into("events");
        b.default_values();
    }));
    assert_eq!(sql, "insert into events default values");
    assert!(args.is_empty());
}

#[test]
fn insert_overriding_system_value() {
    let (sql, _) = parts(insert(|b| {
        b.into("users");
        b.columns(["id", "name"]);
        b.overriding_system_value();
        b.value(row![1, "x"]);
    }));
    assert_eq!(
        sql,
        "insert into users (id, name) overriding system value values (?, ?)"
    );
}

#[test]
fn insert_on_duplicate_key_update() {
    let (sql, args) = parts(insert(|b| {
        b.into("users");
        b.columns(["username", "email"]);
        b.value(row!["tester1", "tester1@localhost"]);
        b.on_duplicate_key().update(|u| {
            u.set("email").to_raw("values(email)");
            u.set("updated_at").to_raw("now()");
        });
    }));
    assert_eq!(
        sql,
        "insert into users (username, email) values (?, ?) on duplicate key update email = values(email), updated_at = now()"
    );
    assert_eq!(
        args,
        vec![Value::from("tester1"), Value::from("tester1@localhost")]
    );
}

#[test]
fn update_assignments() {
    let (sql, args) = parts(update(|b| {
        b.table("users");
        b.set("name").to("test");
        b.set_many(["email", "address", "updated_at"]).to(row![
            "test@localhost",
            "123",
            not_arg("now()")
        ]);
        b.set("age").to_raw(1);
        b.where_with(|c| c.eq("id", 5));
    }));
    assert_eq!(
        sql,
        "update users set name = ?, (email, address, updated_at) = row(?, ?, now()), age = 1 where (id = ?)"
    );
    assert_eq!(
        args,
        vec![
            Value::from("test"),
            Value::from("test@localhost"),
            Value::from("123"),
            Value::from(5),
        ]
    );
}

#[test]
fn update_set_from_select() {
    let (sql, args) = parts(update(|b| {
        b.table("users");
        b.set_many(["name", "age", "updated_at"]).select(|b| {
            b.columns(["name", "age", "now()"]);
            b.from("users");
            b.where_with(|c| c.eq("id", 6));
        });
        b.set("updated_count").to_raw("updated_count + 1");
        b.set_many(["email", "address"])
            .to(row!["test@localhost", "123"]);
        b.where_with(|c| c.eq("id", 5));
    }));
    assert_eq!(
        sql,
        "update users set (name, age, updated_at) = (select name, age, now() from users where (id = ?)), updated_count = updated_count + 1, (email, address) = row(?, ?) where (id = ?)"
    );
    assert_eq!(
        args,
        vec![
            Value::from(6),
            Value::from("test@localhost"),
            Value::from("123"),
            Value::from(5),
        ]
    );
}

#[test]
fn update_from_join() {
    let (sql, args) = parts(update(|b| {
        b.table("users");
        b.set("name").to_raw("p.name");
        b.set("address").to_raw("p.address");
        b.set("updated_at").to_raw("now()");
        b.from("users");
        b.inner_join("profiles p").using(["email"]);
        b.where_with(|c| c.eq("users.id", 2));
    }));
    assert_eq!(
        sql,
        "update users set name = p.name, address = p.address, updated_at = now() from users inner join profiles p using (email) where (users.id = ?)"
    );
    assert_eq!(args, vec![Value::from(2)]);
}

#[test]
fn update_single_column_sub_select() {
    let (sql, args) = parts(update(|b| {
        b.table("users");
        b.set("rank").select(|b| {
            b.columns(["max(rank)"]);
            b.from("scores");
            b.where_with(|c| c.eq("user_id", 9));
        });
        b.where_with(|c| c.eq("id", 9));
    }));
    assert_eq!(
        sql,
        "update users set rank = (select max(rank) from scores where (user_id = ?)) where (id = ?)"
    );
    assert_eq!(args, vec![Value::from(9), Value::from(9)]);
}

#[test]
fn delete_with_or_group() {
    let (sql, args) = parts(delete(|b| {
        b.from("users");
        b.where_with(|c| {
            c.eq("username", "test");
            c.eq("is_active", false);
            c.or(|c| {
                c.gt("age", arg(20));
                c.le("age", arg(30));
            });
        });
    }));
    assert_eq!(
        sql,
        "delete from users where (username = ? and is_active = ?) or (age > ? and age <= ?)"
    );
    assert_eq!(
        args,
        vec![
            Value::from("test"),
            Value::from(false),
            Value::from(20),
            Value::from(30),
        ]
    );
}

#[test]
fn union_arms_and_tail() {
    let (sql, args) = parts(union(|b| {
        b.select(|b| {
            b.columns(["id"]);
            b.from("table1");
        });
        b.all_select(|b| {
            b.columns(["id"]);
            b.from("table2");
        });
        b.distinct_select(|b| {
            b.columns(["id"]);
            b.from("table3");
        });
        b.order_by("id");
        b.limit(10);
    }));
    assert_eq!(
        sql,
        "(select id from table1) union all (select id from table2) union distinct (select id from table3) order by id limit 10"
    );
    assert!(args.is_empty());
}

#[test]
fn placeholder_count_matches_args() {
    let q = select(|b| {
        b.columns(["id"]);
        b.from("users");
        b.where_with(|c| {
            c.eq("a", 1);
            c.in_list("b", [2, 3, 4]);
            c.or(|c| c.eq("c", 5));
        });
    });
    let placeholders = q.sql().matches('?').count();
    assert_eq!(placeholders, q.args().len());
}
