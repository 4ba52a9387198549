/*!

This is the long-form manual for `survey_scoring` and `leaderboard`.

## Scoring

Every answer is looked up in the lookup table. The default table is:

| answer     | score |
|------------|-------|
| `Option A` | 10    |
| `Option B` | 20    |
| `Option C` | 30    |
| `Option D` | 40    |

Anything else, including a blank cell, scores 0. Labels are matched exactly:
`option a` or `Option A ` (trailing space) score 0.

The total score of a respondent is the sum of the scores of all the configured questions.

## Rank and percentile

Respondents are ranked by descending total score. Respondents with the same total share
the best rank of their group, and the next total skips the positions they took:
totals `100, 100, 50` get the ranks `1, 1, 3`.

The percentile is `rank / number of respondents * 100`, rounded to 2 decimals. With the
totals above: `33.33, 33.33, 100`. Note that the percentile grows as the rank gets worse.
An exact half rounds to the even neighbour: rank 1 out of 32 respondents is `3.12`.

## Categories

| total score    | category |
|----------------|----------|
| 80 and above   | Green    |
| 50 to 79       | Yellow   |
| below 50       | Red      |

## Input formats

The following formats are supported:
* `csv` Comma Separated Values
* `xlsx` Excel workbooks, for example the exports of Microsoft Forms and Google Forms

### csv

The first row is the header. It must contain the name column (`Name` by default) and
one column for each question. Other columns are ignored. Leading and trailing spaces in
the header are ignored.

```text
Name,Question1,Question2,Comments
Anna,Option D,Option C,
Bob,Option A,,late
```

### xlsx

Same layout as `csv`, in one worksheet. If the workbook has several worksheets, the name
of the worksheet must be provided.

## Configuration

The program accepts a configuration file in JSON:

```text
{
  "outputSettings": {
    "dashboardTitle": "Student Leaderboard Dashboard",
    "outputDirectory": "out",
    "pageSize": 10
  },
  "fileSources": [
    { "provider": "csv", "filePath": "dataset1.csv", "nameColumn": "Name" }
  ],
  "questions": ["Question1", "Question2"],
  "lookupTable": { "Option A": 10, "Option B": 20, "Option C": 30, "Option D": 40 }
}
```

 - `fileSources`: the records of all the sources are put together, in order.
   `filePath` is relative to the directory of the configuration file.
   `excelWorksheetName` (optional) selects the worksheet for `xlsx` sources.
 - `lookupTable` (optional): replaces the default lookup table.
 - `outputDirectory` (optional): the summary is written to `summary.json` in this directory.

The category thresholds cannot be changed from the configuration file.

 */
