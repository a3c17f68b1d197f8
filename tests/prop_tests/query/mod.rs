mod prop_query;
