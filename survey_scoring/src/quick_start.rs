/*!

# Quick start with Google Forms

This example goes from a survey form to a leaderboard.

Create a form with one **Multiple choice** question per topic. Each question offers the
same four answers: `Option A`, `Option B`, `Option C` and `Option D`. Add a short answer
question named `Name` so that respondents can be told apart.

After the survey is closed, open the `Responses` tab, use the `Create spreadsheet` option
and download the spreadsheet in the **Excel format** (xlsx) or as **comma separated values** (csv).

Run `leaderboard` with the following command (the name of the file may differ for you):

```bash
leaderboard -i 'survey.csv' \
--question "Question1: What is your primary motivation?" \
--question "Question2: How do you view new ideas?"
```

The program needs to know which columns are questions. This is provided with the `--question`
flag. Each value is the name of the column in the first row of the spreadsheet.

After running this command, you should see the leaderboard:

```text
Student Leaderboard Dashboard

Name     Total Score  Rank  Percentile  Category
Anna              80     1       33.33  Green
Bob               80     1       33.33  Green
Charlie           40     3      100.00  Red
(page 1/1)

Category Distribution
Green     2  ########################################
Yellow    0
Red       1  ####################

Percentile Distribution
Anna      33.33  #############
Bob       33.33  #############
Charlie  100.00  ########################################
```

**Display the output** The results can also be written as JSON, for a dashboard to display them.
This is controlled with the `--out` flag:

```bash
leaderboard -i 'survey.csv' \
--question "Question1: What is your primary motivation?" \
--question "Question2: How do you view new ideas?" \
--out leaderboard.json
```

It is the end of this quick start. If you run the same survey regularly, put the questions
in a configuration file and use the `--config` flag. See the [configuration section](../manual/index.html#configuration).

*/
