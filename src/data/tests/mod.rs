mod player;

use academy_test_utils::prelude::*;
use chrono::{Duration, NaiveDate, Utc};

use crate::error::{query::QueryError, Error};
